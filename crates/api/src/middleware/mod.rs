pub mod network_policy;

pub use network_policy::enforce_network_policy;
