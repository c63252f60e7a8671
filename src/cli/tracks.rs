use std::path::Path;

use tabled::Table;

use crate::{error, info, management::TrackTableManager, types::TrackTableRow, warning};

pub async fn tracks(csv: &Path, search: Option<String>) {
    let pool = match TrackTableManager::load_pool(csv).await {
        Ok(pool) => pool,
        Err(e) => error!("Failed to read {}. Err: {}", csv.display(), e),
    };

    let search_term = search.map(|s| s.to_lowercase());
    let table_rows: Vec<TrackTableRow> = pool
        .iter()
        .enumerate()
        .filter(|(_, track)| match &search_term {
            Some(term) => {
                let (title, artist) = track.key();
                title.contains(term) || artist.contains(term)
            }
            None => true,
        })
        .map(|(i, track)| TrackTableRow {
            number: i + 1,
            title: track.title.clone(),
            artist: track.artist.clone(),
        })
        .collect();

    if table_rows.is_empty() {
        warning!("No matching tracks in {}", csv.display());
        return;
    }

    let shown = table_rows.len();
    println!("{}", Table::new(table_rows));
    info!("{} of {} unique tracks", shown, pool.len());
}
