use std::fmt;

use rand::{SeedableRng, rngs::StdRng};

use super::{
    CARD_SIZE,
    allocator::{self, AllocError},
    track::{Card, Pool, UsedSet},
};

/// Default minimum pool size for honouring the no-repeat mode.
pub const DEFAULT_SHORT_POOL_THRESHOLD: usize = CARD_SIZE;

/// Settings for one card generation run.
#[derive(Debug, Clone)]
pub struct CardOptions {
    /// Number of cards to produce, at least one.
    pub card_count: usize,
    /// Keep a song off every later card once it has been placed.
    pub enforce_no_repeat: bool,
    /// Pools smaller than this turn `enforce_no_repeat` off.
    pub short_pool_threshold: usize,
    /// Fixed seed for a reproducible run, or `None` for OS entropy.
    pub seed: Option<u64>,
    /// Printed above the card label.
    pub title: Option<String>,
    /// Printed below the card label.
    pub subtitle: Option<String>,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            card_count: 1,
            enforce_no_repeat: false,
            short_pool_threshold: DEFAULT_SHORT_POOL_THRESHOLD,
            seed: None,
            title: None,
            subtitle: None,
        }
    }
}

/// Non-fatal notices about shortage handling during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The no-repeat mode was requested but the pool is below the threshold.
    NoRepeatDisabled { pool_size: usize, threshold: usize },
    /// The no-repeat mode is active but the pool cannot cover every card.
    RunShortage { pool_size: usize, required: usize },
    /// A card needed fallback draws from the full pool.
    CardShortfall { card_index: usize, reused: usize },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::NoRepeatDisabled {
                pool_size,
                threshold,
            } => write!(
                f,
                "Only {} unique songs (minimum {}), songs may repeat across cards. Add more songs or drop --no-repeat-across.",
                pool_size, threshold
            ),
            Advisory::RunShortage {
                pool_size,
                required,
            } => write!(
                f,
                "{} unique songs cannot fill {} cells without repeats, later cards will reuse songs.",
                pool_size, required
            ),
            Advisory::CardShortfall { card_index, reused } => write!(
                f,
                "Bingo Card #{} ran out of unused songs, {} cells reuse songs from the full list.",
                card_index + 1,
                reused
            ),
        }
    }
}

/// Reasons a run cannot be planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A card count of zero was requested.
    NoCards,
    /// A card could not be filled.
    Allocation(AllocError),
}

impl From<AllocError> for PlanError {
    fn from(err: AllocError) -> Self {
        PlanError::Allocation(err)
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::NoCards => write!(f, "Card count must be greater than zero"),
            PlanError::Allocation(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PlanError {}

/// Outcome of [`plan_cards`].
#[derive(Debug, Clone)]
pub struct CardRun {
    /// Cards in generation order.
    pub cards: Vec<Card>,
    pub advisories: Vec<Advisory>,
    /// Whether the no-repeat mode was actually honoured for this run.
    pub no_repeat_active: bool,
}

/// Allocates every card of a run in order.
///
/// The no-repeat mode is forced off when the pool is smaller than
/// `short_pool_threshold`. Otherwise the used set is threaded through the
/// allocations so each card only sees songs no earlier card has taken.
/// A fixed `seed` makes the whole sequence reproducible.
pub fn plan_cards(pool: &Pool, options: &CardOptions) -> Result<CardRun, PlanError> {
    if options.card_count == 0 {
        return Err(PlanError::NoCards);
    }
    if pool.is_empty() {
        return Err(AllocError::EmptyPool.into());
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut advisories = Vec::new();
    let no_repeat_active =
        options.enforce_no_repeat && pool.len() >= options.short_pool_threshold;

    if options.enforce_no_repeat && !no_repeat_active {
        advisories.push(Advisory::NoRepeatDisabled {
            pool_size: pool.len(),
            threshold: options.short_pool_threshold,
        });
    }

    let required = options.card_count * CARD_SIZE;
    if no_repeat_active && pool.len() < required {
        advisories.push(Advisory::RunShortage {
            pool_size: pool.len(),
            required,
        });
    }

    let mut used = UsedSet::new();
    let mut cards = Vec::with_capacity(options.card_count);

    for card_index in 0..options.card_count {
        let allocation = allocator::allocate(pool, CARD_SIZE, used, no_repeat_active, &mut rng)?;
        if allocation.reused > 0 {
            advisories.push(Advisory::CardShortfall {
                card_index,
                reused: allocation.reused,
            });
        }
        used = allocation.used;
        cards.push(Card::new(allocation.tracks));
    }

    Ok(CardRun {
        cards,
        advisories,
        no_repeat_active,
    })
}
