//! Newest-file discovery.
//!
//! Benchmark scripts drop timestamped files such as
//! `k6_summary_TCP_20240115T100000.json` into a results directory; reports
//! are built from the newest file matching a glob-style name pattern.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::SourceError;

/// Compile a file-name glob (`*` and `?` wildcards) into an anchored regex.
pub fn pattern_regex(pattern: &str) -> Result<Regex, SourceError> {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            c => re.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    re.push('$');
    Regex::new(&re).map_err(|source| SourceError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Newest regular file in `dir` whose name matches `pattern`.
///
/// "Newest" is the latest modification time; equal times fall back to the
/// greater file name so the choice is deterministic. A missing directory or
/// no match at all is [`SourceError::NoInputAvailable`].
pub fn find_latest(dir: &Path, pattern: &str) -> Result<PathBuf, SourceError> {
    let re = pattern_regex(pattern)?;
    let no_input = || SourceError::NoInputAvailable {
        dir: dir.to_path_buf(),
        pattern: pattern.to_string(),
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(no_input()),
        Err(source) => return Err(SourceError::io(dir, source)),
    };

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| SourceError::io(dir, e))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| re.is_match(n));
        if !matches {
            continue;
        }

        let meta = fs::metadata(&path).map_err(|e| SourceError::io(&path, e))?;
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified().map_err(|e| SourceError::io(&path, e))?;

        let is_newer = match &newest {
            None => true,
            Some((t, p)) => (modified, &path) > (*t, p),
        };
        if is_newer {
            newest = Some((modified, path));
        }
    }

    let (_, path) = newest.ok_or_else(no_input)?;
    tracing::debug!(path = %path.display(), pattern, "selected newest match");
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
