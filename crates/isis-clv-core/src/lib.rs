//! Decoder for the CLV record stream carried in IS-IS PDUs.
//!
//! The caller locates the CLV region inside a PDU and picks a decoder table;
//! this crate walks the region record by record and reports what it finds as
//! structured events through an [`OutputSink`]. Decoding is synchronous and
//! side-effect free; file access lives in the `source` module only.
//!
//! Invariants:
//! - No read ever leaves the region, or a record's declared payload.
//! - The walk advances by each record's declared length, whatever its
//!   decoder consumed.
//! - Malformed input yields a partial decoding plus diagnostics, never a
//!   panic or an error from the walk itself.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use isis_clv_core::{DecodeOptions, decode_file};
//!
//! let report = decode_file(Path::new("clvs.hex"), &DecodeOptions::default())?;
//! println!("records: {}", report.records_total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod clv;
mod decode;
mod sink;
mod source;

pub use clv::error::{ClvDiagnostic, CursorError};
pub use clv::reader::ByteCursor;
pub use clv::{
    ALL_CLVS, ClvCategory, DecodeFn, DecoderEntry, DecoderTable, HELLO_CLVS, LSP_CLVS, PduKind,
    SNP_CLVS, WalkOutcome, WalkStatus, decode_clvs, walk,
};
pub use decode::{DecodeError, DecodeOptions, decode_file, decode_region};
pub use sink::{ByteRange, GroupHandle, OutputSink, Severity};
pub use source::{InputFormat, SourceError, parse_hex_text, read_region_file};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Recorded result of one CLV walk.
///
/// `Decoding` is itself an [`OutputSink`]: pass it to [`decode_clvs`] and it
/// collects every group, value and diagnostic in emission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoding {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input metadata, when decoding from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<InputInfo>,
    pub outcome: WalkStatus,
    /// Records dispatched, including unknown ones.
    pub records_total: usize,
    /// One group per recognized record, in wire order.
    pub groups: Vec<GroupSummary>,
    /// Diagnostics in emission order.
    pub diagnostics: Vec<DiagnosticSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided.
    pub path: String,
    /// Decoded input size in bytes.
    pub bytes: u64,
    pub offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    pub category: ClvCategory,
    pub label: String,
    /// Header plus payload.
    pub range: ByteRange,
    pub values: Vec<ValueSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueSummary {
    pub text: String,
    pub range: ByteRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticSummary {
    pub severity: Severity,
    pub message: String,
    pub range: ByteRange,
    /// Hex payload of an unknown record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Decoding {
    pub fn record_outcome(&mut self, outcome: WalkOutcome) {
        self.outcome = outcome.status;
        self.records_total = outcome.records;
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

impl OutputSink for Decoding {
    fn begin_group(
        &mut self,
        category: ClvCategory,
        label: &str,
        range: ByteRange,
    ) -> GroupHandle {
        self.groups.push(GroupSummary {
            category,
            label: label.to_string(),
            range,
            values: Vec::new(),
        });
        GroupHandle::new(self.groups.len() - 1)
    }

    fn emit_value(&mut self, group: GroupHandle, text: &str, range: ByteRange) {
        if let Some(group) = self.groups.get_mut(group.index()) {
            group.values.push(ValueSummary {
                text: text.to_string(),
                range,
            });
        }
    }

    fn emit_diagnostic(&mut self, severity: Severity, message: &str, range: ByteRange) {
        self.diagnostics.push(DiagnosticSummary {
            severity,
            message: message.to_string(),
            range,
            raw: None,
        });
    }

    fn emit_unknown(&mut self, message: &str, raw: &[u8], range: ByteRange) {
        self.diagnostics.push(DiagnosticSummary {
            severity: Severity::Warning,
            message: message.to_string(),
            range,
            raw: Some(hex::encode(raw)),
        });
    }
}

/// Build an empty report with base fields filled.
///
/// # Examples
/// ```
/// use isis_clv_core::make_stub_report;
///
/// let report = make_stub_report(None);
/// assert_eq!(report.report_version, isis_clv_core::REPORT_VERSION);
/// assert!(report.groups.is_empty());
/// ```
pub fn make_stub_report(input: Option<InputInfo>) -> Decoding {
    Decoding {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "isis-clv".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input,
        outcome: WalkStatus::Done,
        records_total: 0,
        groups: vec![],
        diagnostics: vec![],
    }
}
