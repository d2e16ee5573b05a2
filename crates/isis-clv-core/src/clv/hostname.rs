use std::fmt;

use super::error::ClvDiagnostic;
use super::layout;
use super::reader::ByteCursor;
use crate::sink::{GroupHandle, OutputSink};

/// Dynamic hostname. The name is not null-terminated and an empty record
/// means no name at all, which is distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hostname(Option<String>);

impl Hostname {
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Self {
        if cursor.is_empty() {
            return Self(None);
        }
        Self(Some(String::from_utf8_lossy(cursor.read_rest()).into_owned()))
    }

    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(layout::NONE_MARKER))
    }
}

pub fn decode_hostname(
    cursor: &mut ByteCursor<'_>,
    sink: &mut dyn OutputSink,
    group: GroupHandle,
) -> Result<(), ClvDiagnostic> {
    let range = cursor.remaining_range();
    let hostname = Hostname::decode(cursor);
    sink.emit_value(group, &format!("Hostname: {hostname}"), range);
    Ok(())
}
