mod table;

pub use table::TableError;
pub use table::TrackTableManager;
pub use table::{ARTIST_COLUMNS, TITLE_COLUMNS};
