use std::fmt;

use super::error::ClvDiagnostic;
use super::layout;
use super::reader::ByteCursor;
use crate::sink::{ByteRange, GroupHandle, OutputSink};

/// Named topology for a multi-topology identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Ipv4Unicast,
    InBandManagement,
    Ipv6Unicast,
    Multicast,
    Experimental,
    Reserved(u16),
}

impl Topology {
    pub fn from_id(id: u16) -> Self {
        match id {
            layout::MT_ID_IPV4_UNICAST => Topology::Ipv4Unicast,
            layout::MT_ID_IN_BAND_MGMT => Topology::InBandManagement,
            layout::MT_ID_IPV6_UNICAST => Topology::Ipv6Unicast,
            layout::MT_ID_MULTICAST => Topology::Multicast,
            layout::MT_ID_EXPERIMENTAL => Topology::Experimental,
            other => Topology::Reserved(other),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Topology::Ipv4Unicast => "IPv4 unicast",
            Topology::InBandManagement => "In-Band Management",
            Topology::Ipv6Unicast => "IPv6 unicast",
            Topology::Multicast => "Multicast",
            Topology::Experimental => "Development, Experimental or Proprietary",
            Topology::Reserved(_) => "Reserved for IETF Consensus",
        }
    }
}

/// One 2-octet multi-topology entry: 12-bit id plus two flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyEntry {
    pub topology_id: u16,
    pub subtlvs_present: bool,
    pub attached: bool,
}

impl TopologyEntry {
    pub fn from_raw(raw: u16) -> Self {
        Self {
            topology_id: raw & layout::MT_ID_MASK,
            subtlvs_present: raw & layout::MT_FLAG_SUBTLVS != 0,
            attached: raw & layout::MT_FLAG_ATTACHED != 0,
        }
    }

    /// A single leftover octet cannot hold an entry.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, ClvDiagnostic> {
        if cursor.remaining() < layout::MT_ENTRY_LEN {
            return Err(ClvDiagnostic::MalformedTopologyId);
        }
        Ok(Self::from_raw(cursor.read_u16_be()?))
    }

    pub fn topology(&self) -> Topology {
        Topology::from_id(self.topology_id)
    }
}

impl fmt::Display for TopologyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Topology (0x{:03x}), {}subTLVs present{}",
            self.topology().description(),
            self.topology_id,
            if self.subtlvs_present { "" } else { "no " },
            if self.attached { ", ATT bit set" } else { "" }
        )
    }
}

pub fn decode_multi_topology(
    cursor: &mut ByteCursor<'_>,
    sink: &mut dyn OutputSink,
    group: GroupHandle,
) -> Result<(), ClvDiagnostic> {
    while !cursor.is_empty() {
        let start = cursor.offset();
        let entry = TopologyEntry::decode(cursor)?;
        sink.emit_value(
            group,
            &entry.to_string(),
            ByteRange::new(start, layout::MT_ENTRY_LEN),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Topology, TopologyEntry};
    use crate::clv::error::ClvDiagnostic;
    use crate::clv::reader::ByteCursor;

    #[test]
    fn subtlvs_flag_on_ipv4_unicast() {
        let entry = TopologyEntry::decode(&mut ByteCursor::whole(&[0x80, 0x00])).unwrap();
        assert_eq!(entry.topology_id, 0);
        assert!(entry.subtlvs_present);
        assert!(!entry.attached);
        assert_eq!(entry.topology(), Topology::Ipv4Unicast);
        assert_eq!(
            entry.to_string(),
            "IPv4 unicast Topology (0x000), subTLVs present"
        );
    }

    #[test]
    fn attached_experimental() {
        let entry = TopologyEntry::decode(&mut ByteCursor::whole(&[0x4f, 0xff])).unwrap();
        assert_eq!(entry.topology_id, 4095);
        assert!(entry.attached);
        assert!(!entry.subtlvs_present);
        assert_eq!(entry.topology(), Topology::Experimental);
    }

    #[test]
    fn reserved_id() {
        let entry = TopologyEntry::from_raw(0x0042);
        assert_eq!(entry.topology(), Topology::Reserved(0x42));
        assert_eq!(
            entry.to_string(),
            "Reserved for IETF Consensus Topology (0x042), no subTLVs present"
        );
    }

    #[test]
    fn single_octet_is_malformed() {
        let err = TopologyEntry::decode(&mut ByteCursor::whole(&[0x80])).unwrap_err();
        assert_eq!(err, ClvDiagnostic::MalformedTopologyId);
    }
}
