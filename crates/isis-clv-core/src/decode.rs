use std::path::Path;

use thiserror::Error;

use crate::clv::error::CursorError;
use crate::clv::reader::ByteCursor;
use crate::clv::{DecoderTable, PduKind, decode_clvs, walk};
use crate::source::{InputFormat, SourceError, read_region_file};
use crate::{Decoding, InputInfo, make_stub_report};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Invalid CLV region: {0}")]
    Region(#[from] CursorError),
}

/// Options for [`decode_file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    pub format: InputFormat,
    pub pdu: PduKind,
    /// Start of the CLV region inside the input.
    pub offset: usize,
    /// Region length; defaults to everything after `offset`.
    pub length: Option<usize>,
}

pub fn decode_file(path: &Path, options: &DecodeOptions) -> Result<Decoding, DecodeError> {
    let data = read_region_file(path, options.format)?;
    let length = options
        .length
        .unwrap_or_else(|| data.len().saturating_sub(options.offset));

    let mut report = make_stub_report(Some(InputInfo {
        path: path.display().to_string(),
        bytes: data.len() as u64,
        offset: options.offset,
        length,
    }));
    let outcome = decode_clvs(
        &data,
        options.offset,
        length,
        options.pdu.table(),
        &mut report,
    )?;
    report.record_outcome(outcome);
    Ok(report)
}

/// Decode a whole in-memory CLV region.
///
/// # Examples
/// ```
/// use isis_clv_core::{HELLO_CLVS, WalkStatus, decode_region};
///
/// let report = decode_region(&[137, 3, b'r', b't', b'r'], HELLO_CLVS);
/// assert_eq!(report.outcome, WalkStatus::Done);
/// assert_eq!(report.groups[0].values[0].text, "Hostname: rtr");
/// ```
pub fn decode_region(buf: &[u8], table: DecoderTable<'_>) -> Decoding {
    let mut report = make_stub_report(None);
    let outcome = walk(ByteCursor::whole(buf), table, &mut report);
    report.record_outcome(outcome);
    report
}
