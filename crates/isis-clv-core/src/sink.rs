//! Output interface for decode events.
//!
//! Decoders never render anything themselves: they hand labeled values and
//! diagnostics to an [`OutputSink`]. The crate ships one implementation, the
//! [`Decoding`](crate::Decoding) report, which records events for JSON output.

use serde::{Deserialize, Serialize};

use crate::clv::ClvCategory;

/// Absolute byte span inside the decoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    pub offset: usize,
    pub len: usize,
}

impl ByteRange {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

/// Opaque handle returned by [`OutputSink::begin_group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHandle(pub(crate) usize);

impl GroupHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Receiver of structured decode events.
///
/// One sink instance belongs to one decode call; sinks are not shared
/// between concurrent walks.
pub trait OutputSink {
    /// Open the output group for one recognized record.
    fn begin_group(&mut self, category: ClvCategory, label: &str, range: ByteRange)
    -> GroupHandle;

    fn emit_value(&mut self, group: GroupHandle, text: &str, range: ByteRange);

    /// Diagnostics are located by byte range only, not by group.
    fn emit_diagnostic(&mut self, severity: Severity, message: &str, range: ByteRange);

    /// Report a record whose type code has no decoder, along with its raw
    /// payload. By default the payload is appended to the message as hex.
    fn emit_unknown(&mut self, message: &str, raw: &[u8], range: ByteRange) {
        if raw.is_empty() {
            self.emit_diagnostic(Severity::Warning, message, range);
        } else {
            let message = format!("{message}: {}", hex::encode(raw));
            self.emit_diagnostic(Severity::Warning, &message, range);
        }
    }
}
