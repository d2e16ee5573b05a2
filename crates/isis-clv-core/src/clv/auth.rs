use std::fmt;

use super::error::ClvDiagnostic;
use super::layout;
use super::reader::ByteCursor;
use crate::sink::{ByteRange, GroupHandle, OutputSink};

/// Decoded authentication record. One leading octet selects the variant.
///
/// Digests are shown as received; nothing here verifies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationInfo {
    /// `length` is the password octet count on the wire; `text` may be
    /// longer once invalid UTF-8 is replaced.
    ClearText { text: String, length: usize },
    HmacMd5([u8; layout::HMAC_MD5_DIGEST_LEN]),
    MalformedHmacMd5 { length: usize },
    Unsupported { auth_type: u8, length: usize },
}

impl AuthenticationInfo {
    /// Returns `Ok(None)` for an empty record.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Option<Self>, ClvDiagnostic> {
        if cursor.is_empty() {
            return Ok(None);
        }
        let auth_type = cursor.read_u8()?;
        let length = cursor.remaining();
        let info = match auth_type {
            layout::AUTH_TYPE_CLEAR_TEXT => {
                let password = cursor.read_rest();
                AuthenticationInfo::ClearText {
                    text: String::from_utf8_lossy(password).into_owned(),
                    length,
                }
            }
            layout::AUTH_TYPE_HMAC_MD5 if length == layout::HMAC_MD5_DIGEST_LEN => {
                AuthenticationInfo::HmacMd5(cursor.read_array()?)
            }
            layout::AUTH_TYPE_HMAC_MD5 => AuthenticationInfo::MalformedHmacMd5 { length },
            _ => AuthenticationInfo::Unsupported { auth_type, length },
        };
        Ok(Some(info))
    }
}

impl fmt::Display for AuthenticationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthenticationInfo::ClearText { length: 0, .. } => write!(
                f,
                "clear text (1), password (length 0) = no clear-text password found"
            ),
            AuthenticationInfo::ClearText { text, length } => {
                write!(f, "clear text (1), password (length {length}) = {text}")
            }
            AuthenticationInfo::HmacMd5(digest) => write!(
                f,
                "hmac-md5 (54), password (length {}) = 0x{}",
                digest.len(),
                hex::encode(digest)
            ),
            AuthenticationInfo::MalformedHmacMd5 { length } => write!(
                f,
                "hmac-md5 (54), password (length {length}) = illegal hmac-md5 digest format"
            ),
            AuthenticationInfo::Unsupported { auth_type, length } => {
                write!(f, "type 0x{auth_type:02x} (0x{length:02x})")
            }
        }
    }
}

pub fn decode_authentication(
    cursor: &mut ByteCursor<'_>,
    sink: &mut dyn OutputSink,
    group: GroupHandle,
) -> Result<(), ClvDiagnostic> {
    let range = cursor.remaining_range();
    let Some(info) = AuthenticationInfo::decode(cursor)? else {
        return Ok(());
    };
    match info {
        AuthenticationInfo::MalformedHmacMd5 { length } => {
            Err(ClvDiagnostic::MalformedHmacMd5 { length })
        }
        AuthenticationInfo::Unsupported { auth_type, length } => {
            sink.emit_value(group, &info.to_string(), range);
            Err(ClvDiagnostic::UnsupportedAuthType { auth_type, length })
        }
        _ => {
            sink.emit_value(group, &info.to_string(), range);
            Ok(())
        }
    }
}

/// Legacy IP authentication record: the whole payload is text.
pub fn decode_ip_authentication(
    cursor: &mut ByteCursor<'_>,
    sink: &mut dyn OutputSink,
    group: GroupHandle,
) -> Result<(), ClvDiagnostic> {
    if cursor.is_empty() {
        return Ok(());
    }
    let range = cursor.remaining_range();
    let text = String::from_utf8_lossy(cursor.read_rest());
    sink.emit_value(group, &format!("IP Authentication: {text}"), range);
    Ok(())
}
