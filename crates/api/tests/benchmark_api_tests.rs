use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use dnsbench_api::{create_api_routes, AppState, BenchmarkUseCases, ResultUseCases, SettingsUseCases};
use dnsbench_application::ports::{ResolverProbe, RunRegistry};
use dnsbench_application::use_cases::{
    CancelRunUseCase, ExportRunUseCase, GetDnsHintUseCase, GetRunDomainsUseCase, GetRunFailuresUseCase,
    GetRunStatusUseCase, GetRunUseCase, ListRunsUseCase, LocalResolverSettingsUseCase, NetworkPolicySettingsUseCase,
    PublicResolverSettingsUseCase, StartRunUseCase, TestProfileSettingsUseCase,
};
use dnsbench_domain::{ProbeResult, Resolver, TimingSource};
use dnsbench_infrastructure::config_store::{JsonLocalResolversStore, JsonNetworkPolicyStore, JsonPublicResolversStore, JsonTestProfileStore};
use dnsbench_infrastructure::repositories::SqliteRunRepository;
use dnsbench_infrastructure::runtime::{BroadcastEventBus, InMemoryRunRegistry};
use dnsbench_infrastructure::system::ResolvConfHintProvider;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

struct InstantOkProbe;

#[async_trait]
impl ResolverProbe for InstantOkProbe {
    async fn probe(&self, run_id: &str, resolver: &Resolver, domain: &str, _timeout_ms: u32) -> ProbeResult {
        ProbeResult::success(
            run_id,
            resolver.address.to_string(),
            resolver.display_name.clone(),
            domain,
            1.5,
            TimingSource::HighPrecision,
            "93.184.216.34".to_string(),
            None,
        )
    }
}

async fn test_app() -> (axum::Router, Arc<dyn RunRegistry>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().to_str().unwrap().to_string();

    let pool = sqlx::SqlitePool::connect(":memory:").await.unwrap();
    sqlx::migrate::Migrator::new(std::path::Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../infrastructure/migrations")))
        .await
        .unwrap()
        .run(&pool)
        .await
        .unwrap();

    let registry: Arc<dyn RunRegistry> = Arc::new(InMemoryRunRegistry::new());
    let events = Arc::new(BroadcastEventBus::new());
    let repository = Arc::new(SqliteRunRepository::new(pool));
    let local_resolvers = Arc::new(JsonLocalResolversStore::new(config_dir.clone()));
    let public_resolvers = Arc::new(JsonPublicResolversStore::new(config_dir.clone()));
    let test_profile = Arc::new(JsonTestProfileStore::new(config_dir.clone()));
    let network_policy = Arc::new(JsonNetworkPolicyStore::new(config_dir));
    let probe: Arc<dyn ResolverProbe> = Arc::new(InstantOkProbe);

    let start_run = Arc::new(StartRunUseCase::new(
        probe,
        registry.clone(),
        events.clone(),
        repository.clone(),
        local_resolvers.clone(),
        public_resolvers.clone(),
        test_profile.clone(),
    ));

    let state = AppState {
        benchmark: BenchmarkUseCases {
            start_run,
            cancel_run: Arc::new(CancelRunUseCase::new(registry.clone())),
            get_status: Arc::new(GetRunStatusUseCase::new(registry.clone())),
        },
        results: ResultUseCases {
            list_runs: Arc::new(ListRunsUseCase::new(repository.clone())),
            get_run: Arc::new(GetRunUseCase::new(repository.clone())),
            get_domains: Arc::new(GetRunDomainsUseCase::new(repository.clone())),
            get_failures: Arc::new(GetRunFailuresUseCase::new(repository.clone())),
            export_run: Arc::new(ExportRunUseCase::new(repository)),
        },
        settings: SettingsUseCases {
            local_resolvers: Arc::new(LocalResolverSettingsUseCase::new(local_resolvers)),
            public_resolvers: Arc::new(PublicResolverSettingsUseCase::new(public_resolvers)),
            test_profile: Arc::new(TestProfileSettingsUseCase::new(test_profile)),
            network_policy: Arc::new(NetworkPolicySettingsUseCase::new(network_policy)),
        },
        dns_hint: Arc::new(GetDnsHintUseCase::new(Arc::new(ResolvConfHintProvider::new()))),
        events,
    };

    (create_api_routes(state), registry, dir)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_reports_ok() {
    let (app, _registry, _dir) = test_app().await;
    let response = app.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn full_custom_run_completes_and_is_retrievable() {
    let (app, registry, _dir) = test_app().await;

    let start_body = json!({
        "kind": "custom",
        "resolvers": [{
            "id": "r1", "address": "8.8.8.8", "display_name": "Google", "provider_label": "Google",
            "origin": "built_in_public", "enabled": true, "is_primary": false
        }],
        "domains": ["example.com"]
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/benchmark/start")
                .header("content-type", "application/json")
                .body(Body::from(start_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let run_id = body["run_id"].as_str().unwrap().to_string();
    assert_eq!(body["status"], "started");

    // Scheduler runs as a spawned task; poll the registry until it reaches a
    // terminal status instead of sleeping a fixed amount.
    for _ in 0..50 {
        if registry.observe(&run_id).await.map(|s| s.status.is_terminal()).unwrap_or(false) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let response = app.oneshot(Request::builder().uri(format!("/results/{run_id}")).body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], run_id);
    assert_eq!(body["summaries"][0]["successful"], 1);
}

#[tokio::test]
async fn unknown_run_status_is_not_found() {
    let (app, _registry, _dir) = test_app().await;
    let response = app.oneshot(Request::builder().uri("/benchmark/does-not-exist/status").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
