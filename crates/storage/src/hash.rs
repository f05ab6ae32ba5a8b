//! Shard routing hash
//!
//! FNV-1a over the key bytes: fast, deterministic, reasonably uniform.
//! Not cryptographic and not seeded, so routing is identical across store
//! instances and processes.

const FNV_OFFSET_BASIS_32: u32 = 2_166_136_261;
const FNV_PRIME_32: u32 = 16_777_619;

/// 32-bit FNV-1a fingerprint of `bytes`
#[inline]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS_32;
    for &b in bytes {
        hash ^= u32::from(b);
        hash = hash.wrapping_mul(FNV_PRIME_32);
    }
    hash
}
