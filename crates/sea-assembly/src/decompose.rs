//! Pairwise decomposition of declared junctions.
//!
//! The physics engine represents only two-system couplings. A junction
//! declared over more systems is approximated by a chain of couplings
//! between consecutive participants in declaration order, which replaces
//! the declared "all systems mutually coupled" topology with a path; the
//! substitution is surfaced to the user as a warning.

use sea_core::SystemId;
use sea_model::Junction;
use tracing::warn;

/// One pairwise coupling to construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouplingPlan {
    pub name: String,
    pub a: SystemId,
    pub b: SystemId,
}

/// Plan the pairwise couplings for a declared junction.
///
/// Two participants yield one coupling under the junction's own name.
/// N > 2 participants yield N-1 chained couplings named `{name}_{i}`,
/// each inheriting the junction's geometric parameters verbatim.
pub fn decompose(junction: &Junction) -> Vec<CouplingPlan> {
    if junction.systems.len() == 2 {
        return vec![CouplingPlan {
            name: junction.name.clone(),
            a: junction.systems[0],
            b: junction.systems[1],
        }];
    }

    if junction.systems.len() > 2 {
        warn!(
            junction = %junction.name,
            participants = junction.systems.len(),
            "junction couples more than two systems; decomposing into \
             consecutive pairs, which couples the systems along a path \
             instead of mutually"
        );
    }

    junction
        .systems
        .windows(2)
        .enumerate()
        .map(|(i, pair)| CouplingPlan {
            name: format!("{}_{}", junction.name, i),
            a: pair[0],
            b: pair[1],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sea_model::JunctionKind;

    fn junction_over(n: u32) -> Junction {
        Junction {
            name: "j".to_string(),
            kind: JunctionKind::Area { area: Some(4.0) },
            systems: (1..=n)
                .map(|i| SystemId::new(i).expect("nonzero"))
                .collect(),
        }
    }

    #[test]
    fn two_participants_keep_the_junction_name() {
        let plans = decompose(&junction_over(2));
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].name, "j");
        assert_eq!(plans[0].a.get(), 1);
        assert_eq!(plans[0].b.get(), 2);
    }

    #[test]
    fn three_participants_chain_without_closing() {
        let plans = decompose(&junction_over(3));
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].name, "j_0");
        assert_eq!((plans[0].a.get(), plans[0].b.get()), (1, 2));
        assert_eq!(plans[1].name, "j_1");
        assert_eq!((plans[1].a.get(), plans[1].b.get()), (2, 3));
        // No direct 1-3 coupling.
        assert!(
            !plans
                .iter()
                .any(|p| (p.a.get(), p.b.get()) == (1, 3) || (p.a.get(), p.b.get()) == (3, 1))
        );
    }

    proptest! {
        #[test]
        fn plan_count_matches_participant_count(n in 2u32..32) {
            let plans = decompose(&junction_over(n));
            let expected = if n == 2 { 1 } else { (n - 1) as usize };
            prop_assert_eq!(plans.len(), expected);
        }

        #[test]
        fn chained_plans_are_consecutive(n in 3u32..32) {
            let plans = decompose(&junction_over(n));
            for (i, plan) in plans.iter().enumerate() {
                prop_assert_eq!(plan.a.get(), i as u32 + 1);
                prop_assert_eq!(plan.b.get(), i as u32 + 2);
                prop_assert_eq!(plan.name.clone(), format!("j_{i}"));
            }
        }
    }
}
