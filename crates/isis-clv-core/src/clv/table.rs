use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ClvDiagnostic;
use super::layout;
use super::reader::ByteCursor;
use super::{address, area, auth, hostname, nlpid, topology};
use crate::sink::{GroupHandle, OutputSink};

/// Payload decoder. Returning an error stops the record; the walk still
/// moves on to the next one.
pub type DecodeFn =
    fn(&mut ByteCursor<'_>, &mut dyn OutputSink, GroupHandle) -> Result<(), ClvDiagnostic>;

/// Output group kind for a recognized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClvCategory {
    AreaAddresses,
    Authentication,
    IpAuthentication,
    Hostname,
    MultiTopology,
    Ipv4InterfaceAddresses,
    Ipv6InterfaceAddresses,
    TeRouterId,
    ProtocolsSupported,
}

#[derive(Clone, Copy)]
pub struct DecoderEntry {
    pub code: u8,
    pub label: &'static str,
    pub category: ClvCategory,
    pub decoder: DecodeFn,
}

impl fmt::Debug for DecoderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderEntry")
            .field("code", &self.code)
            .field("label", &self.label)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Ordered type-code lookup. The first entry with a matching code wins, so
/// an earlier entry shadows any later duplicate.
///
/// # Examples
/// ```
/// use isis_clv_core::{ClvCategory, SNP_CLVS};
///
/// let entry = SNP_CLVS.lookup(10).expect("authentication");
/// assert_eq!(entry.category, ClvCategory::Authentication);
/// assert!(SNP_CLVS.lookup(1).is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecoderTable<'a> {
    entries: &'a [DecoderEntry],
}

impl<'a> DecoderTable<'a> {
    pub const fn new(entries: &'a [DecoderEntry]) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, code: u8) -> Option<&'a DecoderEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    pub fn entries(&self) -> &'a [DecoderEntry] {
        self.entries
    }
}

const AREA_ADDRESSES: DecoderEntry = DecoderEntry {
    code: layout::CLV_AREA_ADDRESSES,
    label: "Area address(es)",
    category: ClvCategory::AreaAddresses,
    decoder: area::decode_area_addresses,
};

const AUTHENTICATION: DecoderEntry = DecoderEntry {
    code: layout::CLV_AUTHENTICATION,
    label: "Authentication",
    category: ClvCategory::Authentication,
    decoder: auth::decode_authentication,
};

const IP_AUTHENTICATION: DecoderEntry = DecoderEntry {
    code: layout::CLV_IP_AUTHENTICATION,
    label: "IP authentication (deprecated)",
    category: ClvCategory::IpAuthentication,
    decoder: auth::decode_ip_authentication,
};

const PROTOCOLS_SUPPORTED: DecoderEntry = DecoderEntry {
    code: layout::CLV_PROTOCOLS_SUPPORTED,
    label: "Protocols supported",
    category: ClvCategory::ProtocolsSupported,
    decoder: nlpid::decode_protocols_supported,
};

const IPV4_INTERFACE_ADDRESSES: DecoderEntry = DecoderEntry {
    code: layout::CLV_IPV4_INTERFACE_ADDRESSES,
    label: "IP Interface address(es)",
    category: ClvCategory::Ipv4InterfaceAddresses,
    decoder: address::decode_ipv4_interfaces,
};

const IPV6_INTERFACE_ADDRESSES: DecoderEntry = DecoderEntry {
    code: layout::CLV_IPV6_INTERFACE_ADDRESSES,
    label: "IPv6 Interface address(es)",
    category: ClvCategory::Ipv6InterfaceAddresses,
    decoder: address::decode_ipv6_interfaces,
};

const TE_ROUTER_ID: DecoderEntry = DecoderEntry {
    code: layout::CLV_TE_ROUTER_ID,
    label: "Traffic Engineering Router ID",
    category: ClvCategory::TeRouterId,
    decoder: address::decode_te_router_id,
};

const DYNAMIC_HOSTNAME: DecoderEntry = DecoderEntry {
    code: layout::CLV_DYNAMIC_HOSTNAME,
    label: "Hostname",
    category: ClvCategory::Hostname,
    decoder: hostname::decode_hostname,
};

const MULTI_TOPOLOGY: DecoderEntry = DecoderEntry {
    code: layout::CLV_MULTI_TOPOLOGY,
    label: "Multi Topology",
    category: ClvCategory::MultiTopology,
    decoder: topology::decode_multi_topology,
};

static HELLO_ENTRIES: [DecoderEntry; 8] = [
    AREA_ADDRESSES,
    PROTOCOLS_SUPPORTED,
    IPV4_INTERFACE_ADDRESSES,
    IPV6_INTERFACE_ADDRESSES,
    AUTHENTICATION,
    IP_AUTHENTICATION,
    MULTI_TOPOLOGY,
    DYNAMIC_HOSTNAME,
];

static LSP_ENTRIES: [DecoderEntry; 9] = [
    AREA_ADDRESSES,
    PROTOCOLS_SUPPORTED,
    IPV4_INTERFACE_ADDRESSES,
    IPV6_INTERFACE_ADDRESSES,
    TE_ROUTER_ID,
    DYNAMIC_HOSTNAME,
    AUTHENTICATION,
    IP_AUTHENTICATION,
    MULTI_TOPOLOGY,
];

static SNP_ENTRIES: [DecoderEntry; 1] = [AUTHENTICATION];

static ALL_ENTRIES: [DecoderEntry; 9] = [
    AREA_ADDRESSES,
    AUTHENTICATION,
    PROTOCOLS_SUPPORTED,
    IPV4_INTERFACE_ADDRESSES,
    IP_AUTHENTICATION,
    TE_ROUTER_ID,
    DYNAMIC_HOSTNAME,
    MULTI_TOPOLOGY,
    IPV6_INTERFACE_ADDRESSES,
];

/// Records understood in hello (IIH) PDUs.
pub static HELLO_CLVS: DecoderTable<'static> = DecoderTable::new(&HELLO_ENTRIES);

/// Records understood in link-state PDUs.
pub static LSP_CLVS: DecoderTable<'static> = DecoderTable::new(&LSP_ENTRIES);

/// Records understood in sequence-number PDUs.
pub static SNP_CLVS: DecoderTable<'static> = DecoderTable::new(&SNP_ENTRIES);

/// Every record type this crate decodes.
pub static ALL_CLVS: DecoderTable<'static> = DecoderTable::new(&ALL_ENTRIES);

/// PDU family whose built-in table should drive the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PduKind {
    #[default]
    Any,
    Hello,
    Lsp,
    Snp,
}

impl PduKind {
    pub fn table(self) -> DecoderTable<'static> {
        match self {
            PduKind::Any => ALL_CLVS,
            PduKind::Hello => HELLO_CLVS,
            PduKind::Lsp => LSP_CLVS,
            PduKind::Snp => SNP_CLVS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ALL_CLVS, ClvCategory, DecoderEntry, DecoderTable, HELLO_CLVS, PduKind};
    use crate::clv::{area, hostname};

    #[test]
    fn first_match_wins() {
        static ENTRIES: [DecoderEntry; 2] = [
            DecoderEntry {
                code: 1,
                label: "first",
                category: ClvCategory::AreaAddresses,
                decoder: area::decode_area_addresses,
            },
            DecoderEntry {
                code: 1,
                label: "second",
                category: ClvCategory::Hostname,
                decoder: hostname::decode_hostname,
            },
        ];
        let table = DecoderTable::new(&ENTRIES);
        assert_eq!(table.lookup(1).unwrap().label, "first");
        assert!(table.lookup(2).is_none());
    }

    #[test]
    fn hello_table_has_no_router_id() {
        assert!(HELLO_CLVS.lookup(134).is_none());
        assert!(PduKind::Lsp.table().lookup(134).is_some());
    }

    #[test]
    fn all_table_codes_are_unique() {
        let mut codes: Vec<u8> = ALL_CLVS.entries().iter().map(|e| e.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 9);
    }
}
