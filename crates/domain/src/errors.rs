use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid resolver address: {0}")]
    InvalidResolverAddress(String),

    #[error("resolver address is a loopback address: {0}")]
    LoopbackResolver(String),

    #[error("domain list must not be empty")]
    EmptyDomainList,

    #[error("domain list has {0} entries, which exceeds the bound for this profile")]
    DomainListTooLarge(usize),

    #[error("resolver list must not be empty")]
    EmptyResolverList,

    #[error("unknown run kind: {0}")]
    UnknownRunKind(String),

    #[error("invalid test profile field '{field}': {reason}")]
    InvalidTestProfile { field: String, reason: String },

    #[error("run not found: {0}")]
    RunNotFound(String),

    #[error("invalid run status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("too many local resolvers configured (max {0})")]
    TooManyLocalResolvers(usize),

    #[error("too many public resolvers configured (max {0})")]
    TooManyPublicResolvers(usize),

    #[error("cannot delete built-in resolver: {0}")]
    CannotDeleteBuiltIn(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    /// Stable, machine-readable code for the surface's structured error body
    /// (§7: "a stable `code`... and a human `message`; internals never leak
    /// through"). Kept here, next to the variants, so a new variant can't be
    /// added without deciding its code.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidResolverAddress(_) => "invalid_resolver_address",
            DomainError::LoopbackResolver(_) => "loopback_resolver",
            DomainError::EmptyDomainList => "empty_domain_list",
            DomainError::DomainListTooLarge(_) => "domain_list_too_large",
            DomainError::EmptyResolverList => "empty_resolver_list",
            DomainError::UnknownRunKind(_) => "unknown_run_kind",
            DomainError::InvalidTestProfile { .. } => "invalid_test_profile",
            DomainError::RunNotFound(_) => "run_not_found",
            DomainError::InvalidStatusTransition { .. } => "invalid_status_transition",
            DomainError::TooManyLocalResolvers(_) => "too_many_local_resolvers",
            DomainError::TooManyPublicResolvers(_) => "too_many_public_resolvers",
            DomainError::CannotDeleteBuiltIn(_) => "cannot_delete_builtin",
            DomainError::Store(_) => "store_error",
            DomainError::Invariant(_) => "invariant_violation",
        }
    }

    /// The offending field name, when the error is about one specific input
    /// field (§7 error shape `{code, message, field?}`).
    pub fn field(&self) -> Option<&str> {
        match self {
            DomainError::InvalidTestProfile { field, .. } => Some(field),
            _ => None,
        }
    }
}
