use crate::{Result, ServiceError};
use std::io::BufRead;
use tracing::{error, warn};

/// Outbound edge of a service: pushes values from the service to the
/// outside world (a file, a downstream process, a quote channel).
pub trait Connector<V>: Send + Sync {
    fn publish(&self, value: V) -> Result<()>;
}

/// Drive a line-oriented source through a per-line handler.
///
/// The handler parses one comma-separated record and hands it to its
/// service. Skippable errors (bad line, unknown ticker, missing depth) are
/// logged and the line dropped; IO errors abort the feed. Returns the number
/// of lines accepted.
pub fn subscribe_lines<R, F>(reader: R, mut handle_line: F) -> Result<usize>
where
    R: BufRead,
    F: FnMut(&str) -> Result<()>,
{
    let mut accepted = 0usize;
    for line in reader.lines() {
        let line = line.map_err(ServiceError::from)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match handle_line(trimmed) {
            Ok(()) => accepted += 1,
            Err(err) if err.is_fatal() => {
                error!(%err, "feed aborted");
                return Err(err);
            }
            Err(err) => {
                warn!(%err, "dropping record");
            }
        }
    }
    Ok(accepted)
}

/// Split a record into its comma-separated fields, trimming whitespace.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}
