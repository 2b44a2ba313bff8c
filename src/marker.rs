//! Marker files used to trigger a pipeline run.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, SecondsFormat};

use crate::constants::marker;

/// A throwaway commit that exists only to kick off CI.
#[derive(Debug, Clone)]
pub struct PipelineTestRun {
    pub marker_file_name: String,
    pub body: String,
    pub commit_message: String,
    pub pushed: bool,
}

impl PipelineTestRun {
    /// Describe a run started at `now`. Nothing is written yet.
    pub fn new(now: DateTime<Local>) -> Self {
        let stamp = now.format(marker::TIMESTAMP_FORMAT).to_string();
        Self {
            marker_file_name: file_name(&stamp, 0),
            body: body(&stamp, &now),
            commit_message: format!(
                "test: trigger pipeline run {}",
                now.format("%Y-%m-%d %H:%M:%S")
            ),
            pushed: false,
        }
    }

    /// Create the marker inside `dir`, never overwriting an existing file.
    ///
    /// When the second-resolution name is taken, `-1`, `-2`, ... is appended
    /// and `marker_file_name` is updated to the name actually written.
    pub fn write_to(&mut self, dir: &Path) -> Result<PathBuf> {
        let stamp = self
            .marker_file_name
            .trim_start_matches(marker::FILE_PREFIX)
            .trim_end_matches(&format!(".{}", marker::FILE_EXTENSION))
            .to_string();

        for attempt in 0..marker::MAX_SUFFIX_ATTEMPTS {
            let name = file_name(&stamp, attempt);
            let path = dir.join(&name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(self.body.as_bytes())
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    self.marker_file_name = name;
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to create {}", path.display()));
                }
            }
        }

        anyhow::bail!(
            "Could not find a free marker file name for {} in {}",
            stamp,
            dir.display()
        )
    }
}

fn file_name(stamp: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{}{}.{}", marker::FILE_PREFIX, stamp, marker::FILE_EXTENSION)
    } else {
        format!(
            "{}{}-{}.{}",
            marker::FILE_PREFIX,
            stamp,
            attempt,
            marker::FILE_EXTENSION
        )
    }
}

fn body(stamp: &str, now: &DateTime<Local>) -> String {
    format!(
        "Pipeline test run {}\nCreated at {}\n\nThis file only exists to trigger CI. Delete it once the run has been verified.\n",
        stamp,
        now.to_rfc3339_opts(SecondsFormat::Nanos, false)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
    }

    #[test]
    fn test_names_embed_timestamp() {
        let run = PipelineTestRun::new(fixed_time());
        assert_eq!(run.marker_file_name, "pipeline-test-20260314-150926.txt");
        assert!(run.body.contains("20260314-150926"));
        assert!(run.commit_message.contains("2026-03-14 15:09:26"));
        assert!(!run.pushed);
    }

    #[test]
    fn test_write_creates_file_with_body() {
        let dir = TempDir::new().unwrap();
        let mut run = PipelineTestRun::new(fixed_time());
        let path = run.write_to(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), run.body);
    }

    #[test]
    fn test_same_second_gets_suffix() {
        let dir = TempDir::new().unwrap();
        let mut first = PipelineTestRun::new(fixed_time());
        let mut second = PipelineTestRun::new(fixed_time());

        first.write_to(dir.path()).unwrap();
        second.write_to(dir.path()).unwrap();

        assert_eq!(first.marker_file_name, "pipeline-test-20260314-150926.txt");
        assert_eq!(second.marker_file_name, "pipeline-test-20260314-150926-1.txt");
    }
}
