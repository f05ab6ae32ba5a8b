//! Random keys and values
//!
//! Every generator takes the RNG as an argument; there is no process-wide
//! random state. Workers build their own `StdRng` via [`worker_rng`], so a
//! seeded workload replays the same operation stream.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use speedmap_core::{Error, Key, Result};

/// Golden-ratio increment, spreads worker ids across the seed space
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// RNG for worker `worker`
///
/// With a base seed the stream is reproducible and distinct per worker;
/// without one it is seeded from OS entropy.
pub fn worker_rng(seed: Option<u64>, worker: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ (worker as u64).wrapping_mul(SEED_MIX)),
        None => StdRng::from_entropy(),
    }
}

/// Random key in partition `partition` of width `keyspace`
///
/// Partition `i` covers `[i * keyspace, (i + 1) * keyspace)`; the key is the
/// chosen number rendered as uppercase hex. Partition 0 is the shared
/// conflict range.
///
/// # Errors
///
/// Returns `Error::InvalidConfig` if `keyspace` is zero or the partition
/// does not fit in the `u64` key space.
pub fn random_key<R: Rng + ?Sized>(rng: &mut R, partition: u64, keyspace: u64) -> Result<Key> {
    if keyspace == 0 {
        return Err(Error::InvalidConfig("keyspace must be at least 1".to_string()));
    }
    let min = partition.checked_mul(keyspace).ok_or_else(|| overflow(partition, keyspace))?;
    // The last key of the partition is min + keyspace - 1
    let max = min
        .checked_add(keyspace - 1)
        .ok_or_else(|| overflow(partition, keyspace))?;
    let key = rng.gen_range(min..=max);
    Ok(format!("{:X}", key))
}

fn overflow(partition: u64, keyspace: u64) -> Error {
    Error::InvalidConfig(format!(
        "partition {} of width {} exceeds the key space",
        partition, keyspace
    ))
}

/// `n` random bytes
pub fn random_bytes<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    rng.fill(buf.as_mut_slice());
    buf
}

/// Overwrite `m` randomly chosen positions of `buf` with random bytes
///
/// Much cheaper than regenerating the whole buffer. No-op on an empty buffer.
pub fn random_mutation<R: Rng + ?Sized>(rng: &mut R, buf: &mut [u8], m: usize) {
    if buf.is_empty() {
        return;
    }
    for _ in 0..m {
        let idx = rng.gen_range(0..buf.len());
        buf[idx] = rng.gen();
    }
}
