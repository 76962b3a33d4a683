use crate::shelf::{ShelfId, ShelfRecord};
use thiserror::Error;

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode shelf record: {0}")]
    EncodeError(String),

    #[error("Failed to decode shelf record: {0}")]
    DecodeError(String),

    #[error("Invalid key length: expected 8 bytes, got {0}")]
    InvalidKeyLength(usize),
}

/// Codec for shelf records and their ordered keys
pub struct RecordCodec;

impl RecordCodec {
    /// Encode a record to binary bytes (postcard)
    pub fn encode(record: &ShelfRecord) -> Result<Vec<u8>, CodecError> {
        postcard::to_allocvec(record).map_err(|e| CodecError::EncodeError(e.to_string()))
    }

    /// Decode a record from binary bytes
    pub fn decode(bytes: &[u8]) -> Result<ShelfRecord, CodecError> {
        postcard::from_bytes(bytes).map_err(|e| CodecError::DecodeError(e.to_string()))
    }

    /// Encode an id as a key whose byte order matches numeric order
    ///
    /// Flipping the sign bit moves negatives below zero in big-endian order.
    pub fn encode_key(id: ShelfId) -> [u8; 8] {
        ((id as u64) ^ (1 << 63)).to_be_bytes()
    }

    /// Decode a key produced by [`RecordCodec::encode_key`]
    pub fn decode_key(bytes: &[u8]) -> Result<ShelfId, CodecError> {
        let arr: [u8; 8] = bytes
            .try_into()
            .map_err(|_| CodecError::InvalidKeyLength(bytes.len()))?;
        Ok((u64::from_be_bytes(arr) ^ (1 << 63)) as i64)
    }
}
