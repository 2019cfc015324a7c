//! # Clear Value ABI
//!
//! Clear values travel to the ledger as a sequence of 32-byte big-endian
//! words (`uint256[]` without a length prefix), in the same order as the
//! handles they decrypt.

use crate::CryptoError;
use primitive_types::U256;
use shared_types::AbiEncodedValues;

/// Size of one ABI word.
pub const WORD_SIZE: usize = 32;

/// Encode clear values, one word each.
#[must_use]
pub fn encode_clear_values(values: &[u64]) -> AbiEncodedValues {
    let mut out = vec![0u8; values.len() * WORD_SIZE];
    for (word, value) in out.chunks_exact_mut(WORD_SIZE).zip(values) {
        U256::from(*value).to_big_endian(word);
    }
    AbiEncodedValues(out)
}

/// Decode clear values.
///
/// # Errors
///
/// - `CryptoError::InvalidAbiLength` if the payload is not whole words
/// - `CryptoError::AbiValueOverflow` if a word does not fit in `u64`
pub fn decode_clear_values(encoded: &AbiEncodedValues) -> Result<Vec<u64>, CryptoError> {
    let bytes = encoded.as_bytes();
    if bytes.len() % WORD_SIZE != 0 {
        return Err(CryptoError::InvalidAbiLength { len: bytes.len() });
    }

    bytes
        .chunks_exact(WORD_SIZE)
        .enumerate()
        .map(|(index, word)| {
            let value = U256::from_big_endian(word);
            if value > U256::from(u64::MAX) {
                return Err(CryptoError::AbiValueOverflow { index });
            }
            Ok(value.low_u64())
        })
        .collect()
}
