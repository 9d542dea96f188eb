pub mod config;
pub mod domain_list;
pub mod errors;
pub mod failure_analysis;
pub mod probe_result;
pub mod resolver;
pub mod run;
pub mod server_summary;
pub mod test_profile;

pub use domain_list::{default_domain_pool, DomainList, RunKind};
pub use errors::DomainError;
pub use failure_analysis::{FailureAnalysis, FailurePattern, UpstreamHint};
pub use probe_result::{ErrorKind, ProbeResult, ResponseCode, TimingSource};
pub use resolver::{built_in_public_resolvers, Resolver, ResolverOrigin};
pub use run::{Run, RunStatus};
pub use server_summary::{ServerSummary, TimingPrecision};
pub use test_profile::TestProfile;
