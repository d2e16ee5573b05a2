use thiserror::Error;

/// Errors returned by bounded byte reads.
///
/// # Examples
/// ```
/// use isis_clv_core::CursorError;
///
/// let err = CursorError::OutOfBounds { needed: 2, remaining: 1 };
/// assert!(err.to_string().contains("out of bounds"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("read out of bounds: need {needed} bytes, {remaining} remaining")]
    OutOfBounds { needed: usize, remaining: usize },
    #[error("region {offset}+{length} exceeds buffer of {available} bytes")]
    InvalidRegion {
        offset: usize,
        length: usize,
        available: usize,
    },
}

/// Diagnostics raised while walking a CLV region.
///
/// The `Display` text is the message handed to the output sink.
/// `ShortRecordHeader` ends the walk; every other variant is scoped to the
/// record it was raised in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClvDiagnostic {
    #[error("Short CLV header ({declared} vs {remaining})")]
    ShortRecordHeader { declared: u8, remaining: usize },
    #[error("Unknown code {code} ({length})")]
    UnknownRecordType { code: u8, length: u8 },
    #[error("short address (no length for payload)")]
    MissingAreaLength,
    #[error("short address, packet says {declared}, we have {remaining} left")]
    ShortAreaAddress { declared: usize, remaining: usize },
    #[error("illegal hmac-md5 digest format (must be 16 bytes)")]
    MalformedHmacMd5 { length: usize },
    #[error("authentication type {auth_type} not supported")]
    UnsupportedAuthType { auth_type: u8, length: usize },
    #[error("malformed MT-ID")]
    MalformedTopologyId,
    #[error("Short {family} interface address ({remaining} vs {needed})")]
    ShortInterfaceAddress {
        family: &'static str,
        needed: usize,
        remaining: usize,
    },
    #[error("malformed Traffic Engineering Router ID ({length} vs 4)")]
    MalformedRouterId { length: usize },
    #[error("truncated record: need {needed} bytes, got {remaining}")]
    Truncated { needed: usize, remaining: usize },
}

impl From<CursorError> for ClvDiagnostic {
    fn from(value: CursorError) -> Self {
        match value {
            CursorError::OutOfBounds { needed, remaining } => {
                ClvDiagnostic::Truncated { needed, remaining }
            }
            CursorError::InvalidRegion {
                length, available, ..
            } => ClvDiagnostic::Truncated {
                needed: length,
                remaining: available,
            },
        }
    }
}
