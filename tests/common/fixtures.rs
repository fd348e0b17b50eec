//! Static inputs used across harnesses.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// The three-row scenario: one kept entity, one ignored.
pub const SCENARIO_ROWS: &[[&str; 4]] = &[
    ["1000", "app-1", "12.5%", "512MiB"],
    ["1000", "infra-redis", "5%", "10MB"],
    ["1001", "app-1", "13.0%", "520MiB"],
];

/// A stats CSV as written by the sampler script, including noise containers,
/// mixed units and a truncated trailing line.
pub const STATS_CSV: &str = "\
timestamp,name,cpu,mem
1700000000,bench_axum-api_1,12.5%,512MiB
1700000000,bench_infra-redis_1,0.8%,10MB
1700000000,bench_user-consumer_1,3.1%,96.4MB
1700000000,bench_infra-kafka-ui_1,1.0%,300MiB
1700000001,bench_axum-api_1,55.0%,1.5GiB
1700000001,bench_user-consumer_1,4.0%,102400KB
1700000001,bench_infra-mssql_1,20%,2GB
1700000002,bench_axum-api_1,61.2%,1.6GB
1700000002,bench_user-
";

/// Write `contents` to `dir/name` with a modification time `age_secs` in the
/// past, so newest-file selection is deterministic.
pub fn write_aged(dir: &Path, name: &str, contents: &str, age_secs: u64) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    let file = std::fs::File::options().write(true).open(&path).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(age_secs))
        .unwrap();
    path
}
