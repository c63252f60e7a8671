use std::{fmt, io::Error, path::Path};

use crate::{
    bingo::{Pool, Track},
    types::TrackRow,
};

/// Accepted headers for the title column, in priority order.
pub const TITLE_COLUMNS: [&str; 3] = ["title", "track", "name"];
/// Accepted headers for the artist column, in priority order.
pub const ARTIST_COLUMNS: [&str; 2] = ["artists", "artist"];

/// Errors raised while reading or writing a track table.
#[derive(Debug)]
pub enum TableError {
    /// The file could not be read or written.
    IoError(Error),
    /// The content is not valid CSV.
    CsvError(csv::Error),
    /// No title or artist column; holds the headers that were found.
    MissingColumns(Vec<String>),
}

impl From<Error> for TableError {
    fn from(err: Error) -> Self {
        TableError::IoError(err)
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        TableError::CsvError(err)
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::IoError(e) => write!(f, "{}", e),
            TableError::CsvError(e) => write!(f, "Invalid CSV: {}", e),
            TableError::MissingColumns(found) => write!(
                f,
                "CSV must contain columns named 'title' and 'artists' (found: {})",
                found.join(", ")
            ),
        }
    }
}

impl std::error::Error for TableError {}

/// Reads and writes track tables.
///
/// The exporter fills a manager with [`TrackRow`]s and persists them; card
/// generation only needs the title and artist columns, which
/// [`TrackTableManager::load_pool`] finds by header name.
pub struct TrackTableManager {
    rows: Vec<TrackRow>,
}

impl TrackTableManager {
    pub fn new(rows: Vec<TrackRow>) -> Self {
        Self { rows }
    }

    /// Number of rows held.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub async fn persist<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| TableError::IoError(e.into_error()))?;

        async_fs::write(path, bytes).await?;
        Ok(())
    }

    pub async fn load_pool<P: AsRef<Path>>(path: P) -> Result<Pool, TableError> {
        let content = async_fs::read_to_string(path.as_ref()).await?;
        Self::parse_pool(&content)
    }

    /// Builds a deduplicated pool from CSV text.
    ///
    /// Header names are matched case-insensitively against [`TITLE_COLUMNS`] and
    /// [`ARTIST_COLUMNS`]. Rows with an empty or missing title or artist are skipped.
    pub fn parse_pool(content: &str) -> Result<Pool, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let find = |candidates: &[&str]| {
            candidates
                .iter()
                .find_map(|c| headers.iter().position(|h| h == c))
        };

        let (Some(title_idx), Some(artist_idx)) = (find(&TITLE_COLUMNS[..]), find(&ARTIST_COLUMNS[..]))
        else {
            return Err(TableError::MissingColumns(headers));
        };

        let mut tracks = Vec::new();
        for record in reader.records() {
            let record = record?;
            let title = record.get(title_idx).unwrap_or_default().trim();
            let artist = record.get(artist_idx).unwrap_or_default().trim();
            if !title.is_empty() && !artist.is_empty() {
                tracks.push(Track::new(title, artist));
            }
        }

        Ok(Pool::from_tracks(tracks))
    }
}
