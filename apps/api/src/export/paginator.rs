//! Text Paginator: fixed-column layout of plain text onto letter-size pages.
//!
//! Lines are hard-truncated to `page_width_chars` (no wrapping, no reflow). Baselines
//! start at `top_y` and step down by `line_step`; when the next baseline would fall
//! below `bottom_margin`, a new page begins at `top_y` again.

use serde::{Deserialize, Serialize};

/// Page geometry in PDF points (1/72 in), origin at the bottom-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_width_chars: usize,
    pub media_width: u32,
    pub media_height: u32,
    pub left_x: u32,
    /// Baseline of the first line on each page.
    pub top_y: u32,
    /// Lowest baseline allowed on a page.
    pub bottom_margin: u32,
    pub line_step: u32,
    pub font_size: u32,
}

/// US letter, 90 columns, 37 lines per page (750 down to 30 in 20pt steps).
pub fn default_page_layout() -> PageLayout {
    PageLayout {
        page_width_chars: 90,
        media_width: 612,
        media_height: 792,
        left_x: 100,
        top_y: 750,
        bottom_margin: 30,
        line_step: 20,
        font_size: 12,
    }
}

impl PageLayout {
    /// Number of baselines that fit between `top_y` and `bottom_margin`, inclusive.
    /// Always at least one, so a degenerate layout still makes progress.
    pub fn lines_per_page(&self) -> usize {
        if self.line_step == 0 || self.top_y < self.bottom_margin {
            return 1;
        }
        ((self.top_y - self.bottom_margin) / self.line_step) as usize + 1
    }

    /// Baseline of the `slot`-th line on a page.
    pub fn baseline(&self, slot: usize) -> u32 {
        self.top_y - (slot as u32) * self.line_step
    }
}

/// One laid-out page. `lines[i]` sits at `layout.baseline(i)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
}

/// Splits `text` into truncated lines and distributes them over pages.
///
/// Empty text produces a single page with no lines.
pub fn render_to_pages(text: &str, layout: &PageLayout) -> Vec<Page> {
    if text.is_empty() {
        return vec![Page::default()];
    }

    let per_page = layout.lines_per_page();
    let mut pages = Vec::new();
    let mut current = Page::default();

    for line in text.split('\n') {
        if current.lines.len() == per_page {
            pages.push(std::mem::take(&mut current));
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        current.lines.push(truncate_chars(line, layout.page_width_chars));
    }
    pages.push(current);

    pages
}

fn truncate_chars(line: &str, width: usize) -> String {
    match line.char_indices().nth(width) {
        Some((byte_idx, _)) => line[..byte_idx].to_string(),
        None => line.to_string(),
    }
}
