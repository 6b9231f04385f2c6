//! Deterministic seed derivation
//!
//! The master seed comes from the founding quote; every flower seed is mixed
//! from the master seed and a stable hash of the flower's word, so the same
//! quote always grows the same garden.

use crate::error::GardenError;

pub const DEFAULT_MODULUS: u64 = 1_000_000_007;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Offset between the seeds of consecutive words in one phrase.
const SLOT_STRIDE: u64 = 101;

/// Derive the master seed of a garden using the default prime modulus.
pub fn derive_master_seed(quote: &str) -> Result<u64, GardenError> {
    derive_master_seed_with_modulus(quote, DEFAULT_MODULUS)
}

/// Sum of character codes times whitespace token count, reduced modulo
/// `modulus`.
pub fn derive_master_seed_with_modulus(quote: &str, modulus: u64) -> Result<u64, GardenError> {
    let quote = quote.trim();
    if quote.is_empty() {
        return Err(GardenError::EmptyInput);
    }
    if modulus == 0 {
        return Err(GardenError::InvalidConfig(
            "seed modulus must be greater than zero".into(),
        ));
    }

    let code_sum: u128 = quote.chars().map(|c| c as u128).sum();
    let tokens = quote.split_whitespace().count() as u128;
    Ok(((code_sum * tokens) % modulus as u128) as u64)
}

/// 64-bit FNV-1a over the UTF-8 bytes of `word`.
pub fn stable_hash(word: &str) -> u64 {
    word.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    })
}

/// Seed for the flower grown from `word` at position `slot` of its phrase.
///
/// Arithmetic wraps in 64 bits before truncation, which is exact modulo
/// 2^32; nomads use slot `-1`.
pub fn flower_seed(master_seed: u64, word: &str, slot: i64) -> u32 {
    master_seed
        .wrapping_add(stable_hash(word))
        .wrapping_add((slot as u64).wrapping_mul(SLOT_STRIDE)) as u32
}
