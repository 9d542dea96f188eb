pub mod benchmark;
pub mod dns_hint;
pub mod health;
pub mod results;
pub mod settings;

pub use benchmark::{cancel_benchmark, get_benchmark_status, start_benchmark};
pub use dns_hint::get_dns_current;
pub use health::health_check;
pub use results::{export_result, get_result, get_result_domains, get_result_failures, list_results};
pub use settings::{
    get_local_resolvers, get_network_policy, get_public_resolvers, get_test_profile, put_local_resolvers,
    put_network_policy, put_public_resolvers, put_test_profile,
};
