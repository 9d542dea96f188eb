use serde::{Deserialize, Serialize};

/// Engine-wide safety knobs that are not part of the per-run `TestProfile` (§5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Wall-clock cap after which a still-running run is force-failed with
    /// `run_wallclock_exceeded`, regardless of per-probe timeouts (§5).
    pub run_wallclock_cap_secs: u64,
    /// How long a terminal run stays in the in-memory registry before eviction (§4.4).
    pub run_registry_retention_secs: u64,
    /// Per-run-id event bus channel capacity; a lagging subscriber drops intermediate
    /// `probe_result` events but always receives the terminal event (§4.5).
    pub event_bus_capacity: usize,
    /// Config document directory, each document rewritten atomically on update (§4.7).
    pub config_dir: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            run_wallclock_cap_secs: 600,
            run_registry_retention_secs: 300,
            event_bus_capacity: 256,
            config_dir: "./data/config".to_string(),
        }
    }
}
