pub mod probe;

pub use probe::HickoryResolverProbe;
