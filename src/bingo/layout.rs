//! Logical page layout for a single bingo card.
//!
//! Every coordinate here is a fraction of the page (origin bottom-left, like
//! PDF user space). Converting to physical units is left to the document
//! writer, see [`crate::bingo::document`].

use std::fmt;

use super::{CARD_SIZE, GRID_COLS, GRID_ROWS, track::Card};

/// US letter, portrait.
pub const PAGE_WIDTH_MM: f32 = 215.9;
pub const PAGE_HEIGHT_MM: f32 = 279.4;

pub const DEFAULT_WRAP_WIDTH: usize = 18;

/// Grid bounds as page fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 0.05,
            right: 0.95,
            top: 0.88,
            bottom: 0.06,
        }
    }
}

/// Geometry and typography knobs for [`render_card_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub margins: Margins,
    pub wrap_width: usize,
    pub cell_font_size: f32,
    pub title_font_size: f32,
    pub label_font_size: f32,
    pub subtitle_font_size: f32,
    pub border_thickness: f32,
    /// Vertical position of the first header line.
    pub header_top: f32,
    /// Distance between stacked header lines.
    pub header_step: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            wrap_width: DEFAULT_WRAP_WIDTH,
            cell_font_size: 9.0,
            title_font_size: 16.0,
            label_font_size: 12.0,
            subtitle_font_size: 10.0,
            border_thickness: 1.5,
            header_top: 0.95,
            header_step: 0.03,
        }
    }
}

/// Centered block of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub center_x: f32,
    pub center_y: f32,
    pub font_size: f32,
}

/// One bordered grid rectangle and its centered label.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: TextBlock,
}

/// A fully laid out card, ready for [`crate::bingo::document::CardDocument::append`].
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width_mm: f32,
    pub height_mm: f32,
    pub border_thickness: f32,
    pub header: Vec<TextBlock>,
    pub cells: Vec<Cell>,
}

/// Reasons a card cannot be laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The card does not hold exactly one entry per grid cell.
    CardSize { expected: usize, actual: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::CardSize { expected, actual } => write!(
                f,
                "A card needs exactly {} entries but {} were given",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for RenderError {}

/// Lays out one card with the default page geometry.
pub fn render_card(
    card: &Card,
    card_index: usize,
    title: Option<&str>,
    subtitle: Option<&str>,
) -> Result<Page, RenderError> {
    render_card_with(card, card_index, title, subtitle, &LayoutOptions::default())
}

/// Lays out one card.
///
/// Header lines stack down from `header_top`; the grid starts below the
/// lowest of them and fills the margins in row-major order.
///
/// # Errors
///
/// Returns [`RenderError::CardSize`] unless the card holds exactly
/// [`CARD_SIZE`] tracks.
pub fn render_card_with(
    card: &Card,
    card_index: usize,
    title: Option<&str>,
    subtitle: Option<&str>,
    options: &LayoutOptions,
) -> Result<Page, RenderError> {
    if !card.is_complete() {
        return Err(RenderError::CardSize {
            expected: CARD_SIZE,
            actual: card.len(),
        });
    }

    let header = header_blocks(card_index, title, subtitle, options);

    // lowest header line must stay clear of the grid
    let lowest = header
        .last()
        .map(|block| block.center_y)
        .unwrap_or(options.header_top);
    let top = options.margins.top.min(lowest - options.header_step);

    let Margins {
        left,
        right,
        bottom,
        ..
    } = options.margins;
    let cell_w = (right - left) / GRID_COLS as f32;
    let cell_h = (top - bottom) / GRID_ROWS as f32;

    let cells = card
        .tracks
        .iter()
        .enumerate()
        .map(|(idx, track)| {
            let row = idx / GRID_COLS;
            let col = idx % GRID_COLS;
            let x = left + col as f32 * cell_w;
            let y = top - (row + 1) as f32 * cell_h;
            Cell {
                row,
                col,
                x,
                y,
                width: cell_w,
                height: cell_h,
                text: TextBlock {
                    lines: wrap_label(&track.label(), options.wrap_width),
                    center_x: x + cell_w / 2.0,
                    center_y: y + cell_h / 2.0,
                    font_size: options.cell_font_size,
                },
            }
        })
        .collect();

    Ok(Page {
        width_mm: PAGE_WIDTH_MM,
        height_mm: PAGE_HEIGHT_MM,
        border_thickness: options.border_thickness,
        header,
        cells,
    })
}

fn header_blocks(
    card_index: usize,
    title: Option<&str>,
    subtitle: Option<&str>,
    options: &LayoutOptions,
) -> Vec<TextBlock> {
    let mut blocks = Vec::with_capacity(3);
    let mut y = options.header_top;

    let mut push = |text: String, font_size: f32| {
        blocks.push(TextBlock {
            lines: vec![text],
            center_x: 0.5,
            center_y: y,
            font_size,
        });
        y -= options.header_step;
    };

    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        push(title.to_string(), options.title_font_size);
    }
    push(
        format!("Bingo Card #{}", card_index + 1),
        options.label_font_size,
    );
    if let Some(subtitle) = subtitle.filter(|s| !s.trim().is_empty()) {
        push(subtitle.to_string(), options.subtitle_font_size);
    }

    blocks
}

/// Greedy word wrap. Words longer than `width` are split across lines.
pub fn wrap_label(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if !current.is_empty() {
                let room = width.saturating_sub(current.chars().count() + 1);
                if room == 0 {
                    lines.push(std::mem::take(&mut current));
                    continue;
                }
                current.push(' ');
                current.extend(word.drain(..room));
                lines.push(std::mem::take(&mut current));
            } else {
                lines.push(word.drain(..width).collect());
            }
        }

        let len = current.chars().count();
        if len == 0 {
            current = word.into_iter().collect();
        } else if len + 1 + word.len() <= width {
            current.push(' ');
            current.extend(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.into_iter().collect()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
