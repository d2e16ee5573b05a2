use std::fmt;

use super::error::ClvDiagnostic;
use super::layout;
use super::reader::ByteCursor;
use crate::sink::{GroupHandle, OutputSink};

pub const NLPID_IEEE_8021AQ: u8 = 0xc1;

/// Network layer protocol identifiers. For a code listed twice the first
/// entry wins.
pub static NLPID_NAMES: &[(u8, &str)] = &[
    (0x00, "NULL"),
    (0x01, "T.70"),
    (0x03, "X.633"),
    (0x08, "Q.931"),
    (0x09, "Q.2931"),
    (0x0c, "Q.2119"),
    (0x80, "SNAP"),
    (0x81, "CLNP"),
    (0x82, "ESIS"),
    (0x83, "ISIS"),
    (0x85, "IDRP"),
    (0x8a, "ESIS (X.25)"),
    (0x8c, "ISO 10030"),
    (0x8d, "ISO 11577"),
    (0x8e, "IPv6"),
    (0xb0, "IP compressed"),
    (0xc0, "TRILL"),
    (0xc1, "SubNetwork Dependent Convergence Function"),
    (0xcc, "IP"),
    (0xcf, "PPP"),
];

/// Names that take precedence over [`NLPID_NAMES`] inside the protocols
/// supported record. 0xc1 is SNDCF in the general registry but IEEE 802.1aq
/// here.
pub static NLPID_OVERRIDES: &[(u8, &str)] = &[(NLPID_IEEE_8021AQ, "IEEE 802.1aq (SPB)")];

pub fn nlpid_name(nlpid: u8) -> &'static str {
    NLPID_OVERRIDES
        .iter()
        .chain(NLPID_NAMES)
        .find(|(code, _)| *code == nlpid)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown")
}

/// Protocols supported list, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NlpidList(Vec<u8>);

impl NlpidList {
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Self {
        Self(cursor.read_rest().to_vec())
    }

    pub fn ids(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for NlpidList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(layout::NONE_MARKER);
        }
        let names = self
            .0
            .iter()
            .map(|id| format!("{} (0x{id:02x})", nlpid_name(*id)))
            .collect::<Vec<_>>();
        f.write_str(&names.join(", "))
    }
}

pub fn decode_protocols_supported(
    cursor: &mut ByteCursor<'_>,
    sink: &mut dyn OutputSink,
    group: GroupHandle,
) -> Result<(), ClvDiagnostic> {
    let range = cursor.remaining_range();
    let list = NlpidList::decode(cursor);
    sink.emit_value(group, &format!("NLPID(s): {list}"), range);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NlpidList, nlpid_name};
    use crate::clv::reader::ByteCursor;

    #[test]
    fn spb_overrides_sndcf() {
        assert_eq!(nlpid_name(0xc1), "IEEE 802.1aq (SPB)");
    }

    #[test]
    fn unknown_id() {
        assert_eq!(nlpid_name(0x42), "Unknown");
    }

    #[test]
    fn list_rendering() {
        let list = NlpidList::decode(&mut ByteCursor::whole(&[0xcc, 0x8e]));
        assert_eq!(list.to_string(), "IP (0xcc), IPv6 (0x8e)");
    }

    #[test]
    fn empty_list() {
        let list = NlpidList::decode(&mut ByteCursor::whole(&[]));
        assert!(list.ids().is_empty());
        assert_eq!(list.to_string(), "--none--");
    }
}
