// tests/property/failover_version_test.rs

//! Property-based tests for failover version encoding.
//! Tests that next-version, decoding, and same-cluster checks agree with each other
//! for arbitrary increments, topologies, and starting versions.

use crate::test_helpers::{arb_topology, build_metadata};
use clustermeta::cluster::residue;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_next_version_is_minimal_owned_slot(
        (increment, topology) in arb_topology(),
        current in 0i64..1_000_000_000,
    ) {
        let metadata = build_metadata(increment, &topology);
        for (name, initial) in &topology {
            let next = metadata.next_failover_version(name, current);
            prop_assert!(next >= current);
            prop_assert_eq!(residue(next, increment), *initial);
            // Nothing smaller in the same class is still >= current.
            prop_assert!(next - increment < current);
        }
    }

    #[test]
    fn test_next_version_is_idempotent(
        (increment, topology) in arb_topology(),
        current in -1_000_000i64..1_000_000_000,
    ) {
        let metadata = build_metadata(increment, &topology);
        for name in topology.keys() {
            let next = metadata.next_failover_version(name, current);
            prop_assert_eq!(metadata.next_failover_version(name, next), next);
        }
    }

    #[test]
    fn test_next_version_decodes_to_same_cluster(
        (increment, topology) in arb_topology(),
        current in 0i64..1_000_000_000,
    ) {
        let metadata = build_metadata(increment, &topology);
        for name in topology.keys() {
            let next = metadata.next_failover_version(name, current);
            prop_assert_eq!(metadata.cluster_name_for_failover_version(next), name.as_str());
        }
    }

    #[test]
    fn test_same_cluster_is_reflexive_and_symmetric(
        (increment, topology) in arb_topology(),
        v1 in any::<i64>(),
        v2 in any::<i64>(),
    ) {
        let metadata = build_metadata(increment, &topology);
        prop_assert!(metadata.is_version_from_same_cluster(v1, v1));
        prop_assert_eq!(
            metadata.is_version_from_same_cluster(v1, v2),
            metadata.is_version_from_same_cluster(v2, v1)
        );
    }

    #[test]
    fn test_successive_failovers_stay_in_class(
        (increment, topology) in arb_topology(),
        current in 0i64..1_000_000_000,
        steps in 1i64..100,
    ) {
        let metadata = build_metadata(increment, &topology);
        for name in topology.keys() {
            let next = metadata.next_failover_version(name, current);
            prop_assert!(metadata.is_version_from_same_cluster(next, next + increment * steps));
        }
    }

    #[test]
    fn test_distinct_clusters_never_match(
        (increment, topology) in arb_topology(),
        current in 0i64..1_000_000_000,
    ) {
        let metadata = build_metadata(increment, &topology);
        let versions: Vec<i64> = topology
            .keys()
            .map(|name| metadata.next_failover_version(name, current))
            .collect();
        for (i, a) in versions.iter().enumerate() {
            for b in &versions[i + 1..] {
                prop_assert!(!metadata.is_version_from_same_cluster(*a, *b));
            }
        }
    }
}
