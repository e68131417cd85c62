// src/core/cluster/version.rs

//! Primitives shared by everything that reads or writes failover versions.

/// Marks an entity that has not been assigned a failover version yet.
pub const EMPTY_VERSION: i64 = -24;

/// Returns `version` modulo `increment`, always in `[0, increment)`.
///
/// Negative versions fold into the same residue classes as positive ones, so
/// `residue(-3, 10) == 7`. `increment` must be positive.
pub fn residue(version: i64, increment: i64) -> i64 {
    version.rem_euclid(increment)
}
