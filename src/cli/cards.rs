use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Res,
    bingo::{self, CardDocument, CardOptions, CardRun},
    error, info,
    management::TrackTableManager,
    success, warning,
};

const DEFAULT_DOCUMENT_TITLE: &str = "Music Bingo";

/// Generates `options.card_count` cards from a track table and writes them as a PDF.
pub async fn cards(csv: &Path, out: &Path, options: CardOptions) {
    let pool = match TrackTableManager::load_pool(csv).await {
        Ok(pool) => pool,
        Err(e) => error!("Failed to read {}. Err: {}", csv.display(), e),
    };

    if pool.is_empty() {
        error!("No usable songs in {}", csv.display());
    }
    info!("Loaded {} unique songs from {}", pool.len(), csv.display());

    let run = match bingo::plan_cards(&pool, &options) {
        Ok(run) => run,
        Err(e) => error!("Cannot generate cards. Err: {}", e),
    };

    for advisory in &run.advisories {
        warning!("{}", advisory);
    }

    match write_cards(&run, &options, out) {
        Ok(pages) => success!("Wrote {} bingo cards to {}", pages, out.display()),
        Err(e) => error!("Failed to write {}. Err: {}", out.display(), e),
    }
}

fn write_cards(run: &CardRun, options: &CardOptions, out: &Path) -> Res<usize> {
    let doc_title = options.title.as_deref().unwrap_or(DEFAULT_DOCUMENT_TITLE);
    let mut document = CardDocument::new(doc_title)?;

    let pb = ProgressBar::new(run.cards.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:30.blue} {pos}/{len} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Rendering cards...");

    for (card_index, card) in run.cards.iter().enumerate() {
        let page = bingo::render_card(
            card,
            card_index,
            options.title.as_deref(),
            options.subtitle.as_deref(),
        );
        let page = match page {
            Ok(page) => page,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.into());
            }
        };
        document.append(&page);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let pages = document.page_count();
    document.save(out)?;
    Ok(pages)
}
