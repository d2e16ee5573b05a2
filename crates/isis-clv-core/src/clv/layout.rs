pub const CLV_HEADER_LEN: usize = 2;

pub const CLV_AREA_ADDRESSES: u8 = 1;
pub const CLV_AUTHENTICATION: u8 = 10;
pub const CLV_PROTOCOLS_SUPPORTED: u8 = 129;
pub const CLV_IPV4_INTERFACE_ADDRESSES: u8 = 132;
pub const CLV_IP_AUTHENTICATION: u8 = 133;
pub const CLV_TE_ROUTER_ID: u8 = 134;
pub const CLV_DYNAMIC_HOSTNAME: u8 = 137;
pub const CLV_MULTI_TOPOLOGY: u8 = 229;
pub const CLV_IPV6_INTERFACE_ADDRESSES: u8 = 232;

pub const AUTH_TYPE_CLEAR_TEXT: u8 = 1;
pub const AUTH_TYPE_HMAC_MD5: u8 = 54;
pub const HMAC_MD5_DIGEST_LEN: usize = 16;

pub const MT_ENTRY_LEN: usize = 2;
pub const MT_ID_MASK: u16 = 0x0fff;
pub const MT_FLAG_SUBTLVS: u16 = 0x8000;
pub const MT_FLAG_ATTACHED: u16 = 0x4000;

pub const MT_ID_IPV4_UNICAST: u16 = 0;
pub const MT_ID_IN_BAND_MGMT: u16 = 1;
pub const MT_ID_IPV6_UNICAST: u16 = 2;
pub const MT_ID_MULTICAST: u16 = 3;
pub const MT_ID_EXPERIMENTAL: u16 = 4095;

pub const IPV4_ADDR_LEN: usize = 4;
pub const IPV6_ADDR_LEN: usize = 16;

pub const NONE_MARKER: &str = "--none--";
