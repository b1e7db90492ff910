//! Grid encodings
//!
//! - `rle`: per-row land runs, the canonical sparse form
//! - `bits`: 8 cells per byte, MSB-first, each row byte-aligned
//!
//! Both are row-local, so rows are encoded in parallel and reassembled in
//! row order.

pub mod bits;
pub mod rle;

pub use bits::{count_land, pack, pack_for, unpack, unpack_for};
pub use rle::{RleRow, RowEncoding, Run, decode_row, encode_row, encode_rows};
