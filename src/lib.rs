//! Convert raw hash bytes (internal, little-endian order) into the
//! byte-reversed hex string used to display Bitcoin-style hashes.

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod telemetry;


pub use convert::{from_display_hash, to_display_hash, ByteSequence, DisplayHash, RangePolicy};
pub use error::ConvertError;
