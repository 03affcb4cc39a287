//! Cache-first release-timestamp resolution.

use crate::model::Coordinate;
use crate::registry::cache::TimestampCache;
use tracing::trace;

/// Source of artifact release times.
///
/// The production implementation is [`RegistryClient`](super::RegistryClient);
/// tests substitute a counting double to verify that cached coordinates never
/// reach the network.
pub trait ReleaseDateSource {
    /// The artifact's release time in epoch milliseconds, or `None` when it
    /// cannot be determined. Implementations must not fail the run for
    /// per-artifact lookup trouble.
    fn release_timestamp_ms(&self, coord: &Coordinate) -> Option<i64>;
}

/// Resolve a coordinate's release time, consulting the cache first.
///
/// A cached release time short-circuits the source entirely. A negative
/// entry recorded earlier in the same run also short-circuits, so one
/// unresolvable artifact costs at most one request per run. Fresh results,
/// positive or negative, are recorded in the cache.
pub fn resolve_timestamp(
    source: &impl ReleaseDateSource,
    cache: &mut TimestampCache,
    coord: &Coordinate,
) -> Option<i64> {
    let gav = coord.gav();
    match cache.lookup(&gav) {
        Some(Some(ts)) => {
            trace!("{gav}: cache hit");
            return Some(ts);
        }
        Some(None) => {
            trace!("{gav}: negative cache hit, skipping lookup");
            return None;
        }
        None => {}
    }
    let resolved = source.release_timestamp_ms(coord);
    cache.record(gav, resolved);
    resolved
}
