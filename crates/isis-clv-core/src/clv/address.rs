use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use super::error::ClvDiagnostic;
use super::layout;
use super::reader::ByteCursor;
use crate::sink::{ByteRange, GroupHandle, OutputSink};

/// Decode a list of `N`-octet addresses, emitting each complete one.
///
/// A short trailing element stops the list; entries already emitted stay.
fn decode_address_list<A, const N: usize>(
    cursor: &mut ByteCursor<'_>,
    sink: &mut dyn OutputSink,
    group: GroupHandle,
    family: &'static str,
) -> Result<(), ClvDiagnostic>
where
    A: From<[u8; N]> + fmt::Display,
{
    while !cursor.is_empty() {
        if cursor.remaining() < N {
            return Err(ClvDiagnostic::ShortInterfaceAddress {
                family,
                needed: N,
                remaining: cursor.remaining(),
            });
        }
        let start = cursor.offset();
        let addr = A::from(cursor.read_array::<N>()?);
        sink.emit_value(
            group,
            &format!("{family} interface address: {addr}"),
            ByteRange::new(start, N),
        );
    }
    Ok(())
}

pub fn decode_ipv4_interfaces(
    cursor: &mut ByteCursor<'_>,
    sink: &mut dyn OutputSink,
    group: GroupHandle,
) -> Result<(), ClvDiagnostic> {
    decode_address_list::<Ipv4Addr, { layout::IPV4_ADDR_LEN }>(cursor, sink, group, "IP")
}

pub fn decode_ipv6_interfaces(
    cursor: &mut ByteCursor<'_>,
    sink: &mut dyn OutputSink,
    group: GroupHandle,
) -> Result<(), ClvDiagnostic> {
    decode_address_list::<Ipv6Addr, { layout::IPV6_ADDR_LEN }>(cursor, sink, group, "IPv6")
}

/// Traffic-engineering router ID: exactly one IPv4 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterId(pub Ipv4Addr);

impl RouterId {
    /// Returns `Ok(None)` for an empty record.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Option<Self>, ClvDiagnostic> {
        if cursor.is_empty() {
            return Ok(None);
        }
        if cursor.remaining() != layout::IPV4_ADDR_LEN {
            return Err(ClvDiagnostic::MalformedRouterId {
                length: cursor.remaining(),
            });
        }
        let octets = cursor.read_array::<{ layout::IPV4_ADDR_LEN }>()?;
        Ok(Some(Self(Ipv4Addr::from(octets))))
    }
}

impl fmt::Display for RouterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub fn decode_te_router_id(
    cursor: &mut ByteCursor<'_>,
    sink: &mut dyn OutputSink,
    group: GroupHandle,
) -> Result<(), ClvDiagnostic> {
    let range = cursor.remaining_range();
    if let Some(router_id) = RouterId::decode(cursor)? {
        sink.emit_value(
            group,
            &format!("Traffic Engineering Router ID: {router_id}"),
            range,
        );
    }
    Ok(())
}
