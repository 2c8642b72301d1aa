use super::Error;

use std::cmp::Ordering;

/// Tracks the last sequence number seen on a shard and rejects records that
/// do not move strictly forward.
#[derive(Debug, Clone, Default)]
pub struct SequenceGuard {
    last: Option<String>,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Accept `current` if it is greater than every sequence number accepted so far.
    /// Records without a sequence number are not checked.
    pub fn check(&mut self, current: Option<&str>) -> Result<(), Error> {
        let Some(current) = current else {
            return Ok(());
        };

        if let Some(previous) = self.last.as_deref() {
            if compare(previous, current) != Ordering::Less {
                return Err(Error::OutOfOrder {
                    previous: previous.to_string(),
                    current: current.to_string(),
                });
            }
        }

        self.last = Some(current.to_string());
        Ok(())
    }
}

/// DynamoDB sequence numbers are decimal strings of varying length, so they are
/// ordered numerically. Anything else falls back to plain string order.
fn compare(a: &str, b: &str) -> Ordering {
    match (decimal(a), decimal(b)) {
        (Some(a), Some(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

fn decimal(val: &str) -> Option<&str> {
    if val.is_empty() || !val.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = val.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0" } else { trimmed })
}
