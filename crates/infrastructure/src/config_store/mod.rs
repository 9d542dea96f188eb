mod json_file;
mod local_resolvers;
mod network_policy;
mod public_resolvers;
mod test_profile;

pub use local_resolvers::JsonLocalResolversStore;
pub use network_policy::JsonNetworkPolicyStore;
pub use public_resolvers::JsonPublicResolversStore;
pub use test_profile::JsonTestProfileStore;
