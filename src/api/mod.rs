pub mod codec;

pub use codec::{decode, decode_patch, merge, DecodeError};
