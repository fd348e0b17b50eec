//! Domain-specific assertion macros for benchplot harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* series invariant was violated and for *which* entity.

use benchplot_core::SeriesSet;

// ---------------------------------------------------------------------------
// Point assertions
// ---------------------------------------------------------------------------

/// Assert the `(timestamp_ms, value)` points of one series of an entity.
///
/// ```rust
/// assert_points!(set, "app-1", cpu_points, [(1_000_000, 12.5), (1_001_000, 13.0)]);
/// ```
#[macro_export]
macro_rules! assert_points {
    ($set:expr, $entity:expr, $series:ident, [$(($ts:expr, $v:expr)),* $(,)?]) => {{
        let set: &benchplot_core::SeriesSet = &$set;
        let entity: &str = $entity;
        let Some(series) = set.get(entity) else {
            panic!(
                "assert_points! failed: no series for {:?}.\n  Entities: {:?}",
                entity,
                set.names().collect::<Vec<_>>()
            );
        };
        let actual: Vec<(i64, f64)> = series
            .$series
            .iter()
            .map(|p| (p.timestamp_ms, p.value))
            .collect();
        let expected: Vec<(i64, f64)> = vec![$(($ts, $v)),*];
        pretty_assertions::assert_eq!(
            actual, expected,
            "{} points of {:?}", stringify!($series), entity
        );
    }};
}

/// Assert the entity order of a series set.
///
/// ```rust
/// assert_entities!(set, ["b", "a"]);
/// ```
#[macro_export]
macro_rules! assert_entities {
    ($set:expr, [$($name:expr),* $(,)?]) => {{
        let set: &benchplot_core::SeriesSet = &$set;
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(set.names().collect::<Vec<_>>(), expected, "entity order");
    }};
}

// ---------------------------------------------------------------------------
// Invariant helpers
// ---------------------------------------------------------------------------

/// Every entity has equally long CPU and memory series with matching
/// timestamps, and no memory value is negative.
pub fn assert_series_aligned(set: &SeriesSet) {
    for series in set {
        assert_eq!(
            series.cpu_points.len(),
            series.mem_points.len(),
            "cpu/mem length mismatch for {:?}",
            series.entity_name
        );
        for (cpu, mem) in series.cpu_points.iter().zip(&series.mem_points) {
            assert_eq!(
                cpu.timestamp_ms, mem.timestamp_ms,
                "cpu/mem timestamp mismatch for {:?}",
                series.entity_name
            );
            assert!(
                mem.value >= 0.0,
                "negative memory {} for {:?}",
                mem.value,
                series.entity_name
            );
        }
    }
}
