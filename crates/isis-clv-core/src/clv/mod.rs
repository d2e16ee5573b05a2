//! IS-IS CLV (code/length/value) decoding.
//!
//! A CLV region is a run of records, each a one-octet code, a one-octet
//! length and that many payload octets. `walk` slices records off the region
//! and routes each payload to the decoder registered for its code in a
//! [`DecoderTable`]. Payload decoders only ever see a cursor bounded by their
//! record's declared length.
//!
//! Layering:
//! - `layout`: type codes, masks and sizes
//! - `reader`: bounded cursor over the packet bytes
//! - `area`, `auth`, `hostname`, `topology`, `address`, `nlpid`: payload
//!   decoders (no direct byte indexing)
//! - `error`: cursor errors and record diagnostics
//! - `table`, `walk`: type-code lookup and the record dispatcher
//!
//! Problems inside one record end that record only. A record whose declared
//! length overruns the region ends the whole walk.

pub mod address;
pub mod area;
pub mod auth;
pub mod error;
pub mod hostname;
pub mod layout;
pub mod nlpid;
pub mod reader;
pub mod table;
pub mod topology;
pub mod walk;

pub use table::{
    ALL_CLVS, ClvCategory, DecodeFn, DecoderEntry, DecoderTable, HELLO_CLVS, LSP_CLVS, PduKind,
    SNP_CLVS,
};
pub use walk::{WalkOutcome, WalkStatus, decode_clvs, walk};
