use std::collections::HashSet;

use playlist_bingo::bingo::{AllocError, CARD_SIZE, Pool, Track, UsedSet, allocate};
use rand::{SeedableRng, rngs::StdRng};

// Helper function to create a pool of `n` distinct tracks
fn create_test_pool(n: usize) -> Pool {
    Pool::from_tracks((0..n).map(|i| Track::new(format!("Song {}", i), format!("Artist {}", i))))
}

#[test]
fn test_allocate_fills_card_from_pool() {
    let pool = create_test_pool(40);
    let mut rng = StdRng::seed_from_u64(7);

    let allocation = allocate(&pool, CARD_SIZE, UsedSet::new(), false, &mut rng).unwrap();

    assert_eq!(allocation.tracks.len(), CARD_SIZE);
    assert_eq!(allocation.reused, 0);
    assert!(allocation.tracks.iter().all(|t| pool.contains(t)));

    // Draw without replacement: no duplicates within the card
    let unique: HashSet<&Track> = allocation.tracks.iter().collect();
    assert_eq!(unique.len(), CARD_SIZE);

    // Used set is untouched when not enforcing
    assert!(allocation.used.is_empty());
}

#[test]
fn test_allocate_records_used_tracks_when_enforcing() {
    let pool = create_test_pool(40);
    let mut rng = StdRng::seed_from_u64(7);

    let first = allocate(&pool, CARD_SIZE, UsedSet::new(), true, &mut rng).unwrap();
    assert_eq!(first.used.len(), CARD_SIZE);

    let second = allocate(&pool, CARD_SIZE, first.used.clone(), true, &mut rng).unwrap();
    assert_eq!(second.used.len(), 2 * CARD_SIZE);
    assert!(second.tracks.iter().all(|t| !first.used.contains(t)));
}

#[test]
fn test_allocate_exact_pool_uses_every_track_once() {
    let pool = create_test_pool(16);
    let mut rng = StdRng::seed_from_u64(1);

    let allocation = allocate(&pool, CARD_SIZE, UsedSet::new(), true, &mut rng).unwrap();

    let unique: HashSet<&Track> = allocation.tracks.iter().collect();
    assert_eq!(unique.len(), 16);
    assert!(pool.iter().all(|t| unique.contains(t)));
}

#[test]
fn test_allocate_small_pool_repeats_within_card() {
    let pool = create_test_pool(5);
    let mut rng = StdRng::seed_from_u64(3);

    let allocation = allocate(&pool, CARD_SIZE, UsedSet::new(), false, &mut rng).unwrap();

    assert_eq!(allocation.tracks.len(), CARD_SIZE);
    assert_eq!(allocation.reused, 11);

    // Every pool track shows up at least once, nothing from outside the pool
    let unique: HashSet<&Track> = allocation.tracks.iter().collect();
    assert_eq!(unique.len(), 5);
    assert!(allocation.tracks.iter().all(|t| pool.contains(t)));
}

#[test]
fn test_allocate_takes_remaining_unused_before_falling_back() {
    let pool = create_test_pool(20);
    let mut rng = StdRng::seed_from_u64(42);

    let first = allocate(&pool, CARD_SIZE, UsedSet::new(), true, &mut rng).unwrap();
    let leftovers: Vec<Track> = pool
        .iter()
        .filter(|t| !first.used.contains(*t))
        .cloned()
        .collect();
    assert_eq!(leftovers.len(), 4);

    let second = allocate(&pool, CARD_SIZE, first.used, true, &mut rng).unwrap();
    assert_eq!(second.tracks.len(), CARD_SIZE);
    assert_eq!(second.reused, 12);
    assert!(leftovers.iter().all(|t| second.tracks.contains(t)));

    // Fallback picks never duplicate a track already on the card
    let unique: HashSet<&Track> = second.tracks.iter().collect();
    assert_eq!(unique.len(), CARD_SIZE);

    // Everything is consumed after the second card
    assert_eq!(second.used.len(), 20);
}

#[test]
fn test_allocate_fallback_keeps_card_distinct_when_pool_is_large_enough() {
    let pool = create_test_pool(20);

    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        // Every track already used, the whole card comes from the fallback
        let used: UsedSet = pool.iter().cloned().collect();

        let allocation = allocate(&pool, CARD_SIZE, used, true, &mut rng).unwrap();

        assert_eq!(allocation.reused, CARD_SIZE);
        let unique: HashSet<&Track> = allocation.tracks.iter().collect();
        assert_eq!(unique.len(), CARD_SIZE, "duplicate on card for seed {}", seed);
    }
}

#[test]
fn test_allocate_empty_pool_fails() {
    let pool = Pool::default();
    let mut rng = StdRng::seed_from_u64(0);

    let result = allocate(&pool, CARD_SIZE, UsedSet::new(), true, &mut rng);
    assert_eq!(result.unwrap_err(), AllocError::EmptyPool);
}

#[test]
fn test_allocate_is_deterministic_for_seed() {
    let pool = create_test_pool(50);

    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    let a = allocate(&pool, CARD_SIZE, UsedSet::new(), false, &mut rng_a).unwrap();
    let b = allocate(&pool, CARD_SIZE, UsedSet::new(), false, &mut rng_b).unwrap();

    assert_eq!(a.tracks, b.tracks);
}

#[test]
fn test_allocate_does_not_touch_pool() {
    let pool = create_test_pool(20);
    let before: Vec<Track> = pool.tracks().to_vec();
    let mut rng = StdRng::seed_from_u64(5);

    let _ = allocate(&pool, CARD_SIZE, UsedSet::new(), true, &mut rng).unwrap();

    assert_eq!(pool.tracks(), before.as_slice());
}
