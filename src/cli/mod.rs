//! # CLI Module
//!
//! User-facing commands. Each command coordinates the lower layers and owns the
//! console output; the library modules below it only return values and errors.
//!
//! ```text
//! export  ── spotify ──> management (CSV)
//! tracks  ── management (CSV) ──> table
//! cards   ── management (CSV) ──> bingo::plan_cards ──> bingo::render_card ──> PDF
//! ```
//!
//! The `export` and `cards` stages are independent and only share the CSV file,
//! so either can be re-run on its own.

mod cards;
mod export;
mod tracks;

pub use cards::cards;
pub use export::{PlaylistSource, export};
pub use tracks::tracks;
