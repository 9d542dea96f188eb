use dnsbench_domain::{DomainError, Resolver, RunKind};

/// §4.7 default resolver-set selection for a run `kind`. `custom` has no default:
/// the operator must supply an explicit, non-empty list.
pub fn default_resolvers_for(kind: RunKind, local: &[Resolver], public: &[Resolver]) -> Result<Vec<Resolver>, DomainError> {
    match kind {
        RunKind::Quick => {
            let mut resolvers: Vec<Resolver> = local.iter().cloned().collect();
            resolvers.extend(public.iter().take(3).cloned());
            Ok(resolvers)
        }
        RunKind::Full => {
            let mut resolvers: Vec<Resolver> = local.iter().cloned().collect();
            resolvers.extend(public.iter().cloned());
            Ok(resolvers)
        }
        RunKind::Custom => Err(DomainError::EmptyResolverList),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsbench_domain::ResolverOrigin;
    use std::net::IpAddr;
    use std::str::FromStr;

    fn resolver(id: &str, addr: &str) -> Resolver {
        Resolver::new(id, IpAddr::from_str(addr).unwrap(), id, id, ResolverOrigin::BuiltInPublic)
    }

    #[test]
    fn quick_takes_all_local_and_first_three_public() {
        let local = vec![resolver("l1", "192.168.1.1")];
        let public = vec![resolver("p1", "1.1.1.1"), resolver("p2", "8.8.8.8"), resolver("p3", "9.9.9.9"), resolver("p4", "208.67.222.222")];
        let selected = default_resolvers_for(RunKind::Quick, &local, &public).unwrap();
        assert_eq!(selected.len(), 4);
        assert_eq!(selected[0].id, "l1");
        assert_eq!(selected[3].id, "p3");
    }

    #[test]
    fn full_takes_all_local_and_all_public() {
        let local = vec![resolver("l1", "192.168.1.1")];
        let public = vec![resolver("p1", "1.1.1.1"), resolver("p2", "8.8.8.8")];
        let selected = default_resolvers_for(RunKind::Full, &local, &public).unwrap();
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn custom_has_no_default() {
        assert!(default_resolvers_for(RunKind::Custom, &[], &[]).is_err());
    }
}
