use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{ClvDiagnostic, CursorError};
use super::layout;
use super::reader::ByteCursor;
use super::table::DecoderTable;
use crate::sink::{ByteRange, OutputSink, Severity};

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkStatus {
    /// Region exhausted, or a lone trailing header byte was left over.
    #[default]
    Done,
    /// A record declared more bytes than the region had left.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOutcome {
    pub status: WalkStatus,
    /// Records dispatched, known and unknown.
    pub records: usize,
}

/// Walk the CLV region `buf[offset..offset + length]`.
///
/// Fails only when the region does not fit in `buf`; malformed records are
/// reported to `sink` and never surface as errors.
pub fn decode_clvs(
    buf: &[u8],
    offset: usize,
    length: usize,
    table: DecoderTable<'_>,
    sink: &mut dyn OutputSink,
) -> Result<WalkOutcome, CursorError> {
    let region = ByteCursor::new(buf, offset, length)?;
    Ok(walk(region, table, sink))
}

/// Walk every record in `region`.
///
/// Each record is handed to its decoder through a cursor limited to its
/// declared length, and the walk always resumes right after that length,
/// so a decoder stopping early cannot shift the framing of later records.
///
/// A zero-length record is still dispatched, even as the last two bytes of
/// the region, rather than dropped as trailing padding.
pub fn walk(
    mut region: ByteCursor<'_>,
    table: DecoderTable<'_>,
    sink: &mut dyn OutputSink,
) -> WalkOutcome {
    let mut records = 0;
    loop {
        let header_offset = region.offset();
        let Ok(code) = region.read_u8() else {
            return WalkOutcome {
                status: WalkStatus::Done,
                records,
            };
        };
        let Ok(declared) = region.read_u8() else {
            debug!(code, offset = header_offset, "ignoring trailing header byte");
            return WalkOutcome {
                status: WalkStatus::Done,
                records,
            };
        };

        let length = usize::from(declared);
        let remaining = region.remaining();
        let Ok(mut record) = region.sub_cursor(length) else {
            let diag = ClvDiagnostic::ShortRecordHeader {
                declared,
                remaining,
            };
            warn!(code, offset = header_offset, %diag, "aborting CLV walk");
            sink.emit_diagnostic(
                Severity::Warning,
                &diag.to_string(),
                ByteRange::new(header_offset, layout::CLV_HEADER_LEN + remaining),
            );
            return WalkOutcome {
                status: WalkStatus::Aborted,
                records,
            };
        };
        records += 1;

        let range = ByteRange::new(header_offset, layout::CLV_HEADER_LEN + length);
        match table.lookup(code) {
            Some(entry) => {
                debug!(code, length, label = entry.label, "decoding CLV");
                let label = format!("{} ({})", entry.label, length);
                let group = sink.begin_group(entry.category, &label, range);
                if let Err(diag) = (entry.decoder)(&mut record, sink, group) {
                    debug!(code, %diag, "CLV decode stopped early");
                    sink.emit_diagnostic(
                        Severity::Warning,
                        &diag.to_string(),
                        record.remaining_range(),
                    );
                }
            }
            None => {
                debug!(code, length, "unknown CLV");
                let diag = ClvDiagnostic::UnknownRecordType {
                    code,
                    length: declared,
                };
                sink.emit_unknown(&diag.to_string(), record.read_rest(), range);
            }
        }
    }
}
