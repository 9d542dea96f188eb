use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use dnsbench_api::{create_api_routes, AppState, BenchmarkUseCases, ResultUseCases, SettingsUseCases};
use dnsbench_application::ports::{ResolverProbe, RunRegistry};
use dnsbench_application::use_cases::{
    CancelRunUseCase, ExportRunUseCase, GetDnsHintUseCase, GetRunDomainsUseCase, GetRunFailuresUseCase,
    GetRunStatusUseCase, GetRunUseCase, ListRunsUseCase, LocalResolverSettingsUseCase, NetworkPolicySettingsUseCase,
    PublicResolverSettingsUseCase, ReaggregateRunUseCase, StartRunUseCase, TestProfileSettingsUseCase,
};
use dnsbench_domain::config::{AppConfig, CliOverrides};
use dnsbench_infrastructure::config_store::{JsonLocalResolversStore, JsonNetworkPolicyStore, JsonPublicResolversStore, JsonTestProfileStore};
use dnsbench_infrastructure::database::create_pool;
use dnsbench_infrastructure::dns::HickoryResolverProbe;
use dnsbench_infrastructure::repositories::SqliteRunRepository;
use dnsbench_infrastructure::runtime::{BroadcastEventBus, InMemoryRunRegistry};
use dnsbench_infrastructure::system::ResolvConfHintProvider;
use dnsbench_jobs::{JobRunner, RunRegistryEvictionJob, WallclockGuardJob};

#[derive(Parser)]
#[command(name = "dnsbench")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "DNS resolver benchmark engine")]
struct Cli {
    /// Configuration file path (TOML).
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address for the HTTP/WebSocket surface.
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// HTTP port.
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// SQLite database path.
    #[arg(long)]
    database: Option<String>,

    /// Configuration document directory.
    #[arg(long)]
    config_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Re-derives ServerSummary/FailureAnalysis rows for a stored run from its
    /// persisted probes and replaces them (operational tooling for the
    /// determinism property, not exposed over HTTP).
    Reaggregate {
        run_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        bind_address: cli.bind.clone(),
        web_port: cli.port,
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
        config_dir: cli.config_dir.clone(),
    };
    let config = AppConfig::load(cli.config.as_deref(), overrides).context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    let log_level = config.logging.level.parse().unwrap_or(tracing::Level::INFO);
    let subscriber = tracing_subscriber::fmt().with_target(true).with_max_level(log_level);
    if config.logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(version = env!("CARGO_PKG_VERSION"), "starting dnsbench");

    let database_url = format!("sqlite:{}", config.database.path);
    let pool = create_pool(&database_url, &config.database).await.context("failed to open database")?;
    let repository = Arc::new(SqliteRunRepository::new(pool));

    if let Some(Command::Reaggregate { run_id }) = cli.command {
        let use_case = ReaggregateRunUseCase::new(repository);
        use_case.execute(&run_id).await.with_context(|| format!("failed to reaggregate run {run_id}"))?;
        info!(run_id = %run_id, "run reaggregated");
        return Ok(());
    }

    let registry: Arc<dyn RunRegistry> = Arc::new(InMemoryRunRegistry::new());
    let events = Arc::new(BroadcastEventBus::new());
    let probe: Arc<dyn ResolverProbe> = Arc::new(HickoryResolverProbe::new());
    let local_resolvers = Arc::new(JsonLocalResolversStore::new(config.runtime.config_dir.clone()));
    let public_resolvers = Arc::new(JsonPublicResolversStore::new(config.runtime.config_dir.clone()));
    let test_profile = Arc::new(JsonTestProfileStore::new(config.runtime.config_dir.clone()));
    let network_policy = Arc::new(JsonNetworkPolicyStore::new(config.runtime.config_dir.clone()));
    let dns_hint = Arc::new(ResolvConfHintProvider::new());

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
        dns_hint: Arc::new(GetDnsHintUseCase::new(dns_hint)),
        events,
    };

    JobRunner::new()
        .with_wallclock_guard(WallclockGuardJob::new(registry.clone(), config.runtime.run_wallclock_cap_secs))
        .with_run_registry_eviction(RunRegistryEvictionJob::new(registry, config.runtime.run_registry_retention_secs))
        .start()
        .await;

    let bind: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.web_port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.server.bind_address, config.server.web_port))?;

    let app = create_api_routes(state);
    let listener = tokio::net::TcpListener::bind(bind).await.with_context(|| format!("failed to bind {bind}"))?;
    info!(%bind, "listening");

    axum::serve(listener, app).await.map_err(|err| {
        error!(error = %err, "server error");
        err
    })?;

    info!("shutdown complete");
    Ok(())
}
