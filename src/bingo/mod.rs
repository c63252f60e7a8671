//! Bingo card generation.
//!
//! The flow for one run is strictly sequential:
//!
//! ```text
//! Pool ──plan_cards──> Vec<Card> ──render_card──> Page ──CardDocument::append──> PDF
//! ```
//!
//! [`planner::plan_cards`] applies the short-pool degradation policy and threads
//! the used set through [`allocator::allocate`], so cards must be allocated in
//! order. [`layout::render_card`] produces a logical page (fractions of the page
//! size) and [`document::CardDocument`] turns those pages into PDF content.

pub mod allocator;
pub mod document;
pub mod layout;
pub mod planner;
pub mod track;

pub const GRID_ROWS: usize = 4;
pub const GRID_COLS: usize = 4;
pub const CARD_SIZE: usize = GRID_ROWS * GRID_COLS;

pub use allocator::{AllocError, Allocation, allocate};
pub use document::{CardDocument, DocumentError};
pub use layout::{Page, RenderError, render_card};
pub use planner::{Advisory, CardOptions, CardRun, PlanError, plan_cards};
pub use track::{Card, Pool, Track, UsedSet};
