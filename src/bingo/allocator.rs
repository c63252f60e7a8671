use std::fmt;

use rand::{Rng, seq::index};

use super::track::{Pool, Track, UsedSet};

/// Reasons a card cannot be allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// The pool holds no tracks.
    EmptyPool,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::EmptyPool => write!(f, "Track pool is empty, nothing to put on a card"),
        }
    }
}

impl std::error::Error for AllocError {}

/// Result of filling one card.
#[derive(Debug, Clone)]
pub struct Allocation {
    /// Picks in draw order, which is also the row-major cell order.
    pub tracks: Vec<Track>,
    /// Used set after this card, to be handed to the next call.
    pub used: UsedSet,
    /// Number of slots filled by the shortage fallback.
    pub reused: usize,
}

/// Picks `k` tracks for one card.
///
/// When `enforce_no_repeat` is set, tracks found in `used` are not eligible for
/// the uniform draw. If fewer than `k` eligible tracks remain, all of them are
/// taken and the rest of the card is filled from the whole pool, so repeats
/// across cards become possible. The fill never duplicates a track already on
/// the card unless the pool itself is smaller than `k`, in which case it draws
/// with replacement.
/// Every pick is recorded in the returned used set while enforcing.
///
/// # Errors
///
/// Returns [`AllocError::EmptyPool`] if `pool` holds no tracks. A pool smaller
/// than `k` is not an error.
pub fn allocate<R: Rng + ?Sized>(
    pool: &Pool,
    k: usize,
    mut used: UsedSet,
    enforce_no_repeat: bool,
    rng: &mut R,
) -> Result<Allocation, AllocError> {
    if pool.is_empty() {
        return Err(AllocError::EmptyPool);
    }

    let available: Vec<&Track> = pool
        .iter()
        .filter(|track| !enforce_no_repeat || !used.contains(*track))
        .collect();

    let mut picks: Vec<Track> = Vec::with_capacity(k);
    let mut reused = 0;

    if available.len() >= k {
        picks.extend(
            index::sample(rng, available.len(), k)
                .into_iter()
                .map(|i| available[i].clone()),
        );
    } else {
        let remaining = available.len();
        picks.extend(
            index::sample(rng, remaining, remaining)
                .into_iter()
                .map(|i| available[i].clone()),
        );

        let missing = k - remaining;
        if pool.len() >= k {
            // enough tracks for a card without duplicates, fill from those not on it yet
            let candidates: Vec<&Track> = pool
                .iter()
                .filter(|track| !picks.contains(*track))
                .collect();
            picks.extend(
                index::sample(rng, candidates.len(), missing)
                    .into_iter()
                    .map(|i| candidates[i].clone()),
            );
        } else {
            for _ in 0..missing {
                let i = rng.random_range(0..pool.len());
                picks.push(pool.tracks()[i].clone());
            }
        }
        reused = missing;
    }

    if enforce_no_repeat {
        used.extend(picks.iter().cloned());
    }

    Ok(Allocation {
        tracks: picks,
        used,
        reused,
    })
}
