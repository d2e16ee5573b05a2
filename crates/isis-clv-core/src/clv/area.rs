use std::fmt;

use super::error::ClvDiagnostic;
use super::reader::ByteCursor;
use crate::sink::{ByteRange, GroupHandle, OutputSink};

/// One area address: an opaque octet string of 0 to 255 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaAddress(Vec<u8>);

impl AreaAddress {
    /// Decode one length-prefixed area address.
    ///
    /// A length octet that is the last byte of the record is reported as
    /// `MissingAreaLength`.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, ClvDiagnostic> {
        let declared = usize::from(cursor.read_u8()?);
        if cursor.is_empty() {
            return Err(ClvDiagnostic::MissingAreaLength);
        }
        if declared > cursor.remaining() {
            return Err(ClvDiagnostic::ShortAreaAddress {
                declared,
                remaining: cursor.remaining(),
            });
        }
        let octets = cursor.read_bytes(declared)?;
        Ok(Self(octets.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for AreaAddress {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

/// `xx.xxxx.xxxx` form: the first octet alone, then octet pairs.
impl fmt::Display for AreaAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.0.split_first() else {
            return Ok(());
        };
        write!(f, "{first:02x}")?;
        for pair in rest.chunks(2) {
            write!(f, ".{}", hex::encode(pair))?;
        }
        Ok(())
    }
}

pub fn decode_area_addresses(
    cursor: &mut ByteCursor<'_>,
    sink: &mut dyn OutputSink,
    group: GroupHandle,
) -> Result<(), ClvDiagnostic> {
    while !cursor.is_empty() {
        let start = cursor.offset();
        let addr = AreaAddress::decode(cursor)?;
        sink.emit_value(
            group,
            &format!("Area address ({}): {}", addr.len(), addr),
            ByteRange::new(start, addr.len() + 1),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::AreaAddress;
    use crate::clv::error::ClvDiagnostic;
    use crate::clv::reader::ByteCursor;

    fn decode(bytes: &[u8]) -> Result<AreaAddress, ClvDiagnostic> {
        AreaAddress::decode(&mut ByteCursor::whole(bytes))
    }

    #[test]
    fn two_octets_have_no_trailing_dot() {
        assert_eq!(decode(&[2, 0x11, 0x22]).unwrap().to_string(), "11.22");
    }

    #[test]
    fn single_octet() {
        assert_eq!(decode(&[1, 0xab]).unwrap().to_string(), "ab");
    }

    #[test]
    fn nsap_style_grouping() {
        let addr = decode(&[5, 0x49, 0x00, 0x01, 0x00, 0x02]).unwrap();
        assert_eq!(addr.to_string(), "49.0001.0002");
        let addr = decode(&[4, 0x49, 0x00, 0x01, 0xaa]).unwrap();
        assert_eq!(addr.to_string(), "49.0001.aa");
    }

    #[test]
    fn lone_length_octet() {
        assert_eq!(decode(&[3]).unwrap_err(), ClvDiagnostic::MissingAreaLength);
    }

    #[test]
    fn length_past_record() {
        assert_eq!(
            decode(&[4, 0x49, 0x00]).unwrap_err(),
            ClvDiagnostic::ShortAreaAddress {
                declared: 4,
                remaining: 2
            }
        );
    }
}
