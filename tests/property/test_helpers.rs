// tests/property/test_helpers.rs

//! Shared strategies and builders for the property tests.

use clustermeta::{ClusterInformation, ClusterMetadata};
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Generates an increment together with up to eight clusters holding distinct
/// initial failover versions in `[0, increment)`.
pub fn arb_topology() -> impl Strategy<Value = (i64, BTreeMap<String, i64>)> {
    (1i64..=100)
        .prop_flat_map(|increment| {
            let max_clusters = increment.min(8) as usize;
            (
                Just(increment),
                prop::collection::btree_set(0..increment, 1..=max_clusters),
            )
        })
        .prop_map(|(increment, initial_versions)| {
            let topology = initial_versions
                .into_iter()
                .enumerate()
                .map(|(i, initial)| (format!("cluster{i}"), initial))
                .collect();
            (increment, topology)
        })
}

/// Builds metadata with every cluster enabled; the first cluster is both primary and current.
pub fn build_metadata(increment: i64, topology: &BTreeMap<String, i64>) -> ClusterMetadata {
    let cluster_group = topology
        .iter()
        .map(|(name, initial)| (name.clone(), ClusterInformation::new(true, *initial)))
        .collect();
    ClusterMetadata::new(increment, "cluster0", "cluster0", cluster_group)
        .expect("generated increment is always positive")
}
