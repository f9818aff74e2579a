//! Fixed-metric page layout.
//!
//! The view builds the page from the same constants, so every block's page
//! position is known without measuring widgets. Page coordinates start at the
//! top of the scrollable content; window coordinates add the nav bar and
//! subtract the scroll offset.

use crate::config::SectionEntry;
use neonfolio_core::preview::{AnchorId, LayoutProbe};
use neonfolio_core::scroll::SectionSpan;
use neonfolio_core::{Rect, Size};

pub const NAV_HEIGHT: f32 = 64.0;
pub const PAGE_PADDING: f32 = 40.0;
pub const BLOCK_GAP: f32 = 80.0;
pub const MIN_HERO_HEIGHT: f32 = 480.0;
pub const CAROUSEL_HEIGHT: f32 = 420.0;
pub const INDICATOR_ROW: f32 = 40.0;
pub const PANEL_HEIGHT: f32 = 240.0;
pub const SECTION_HEADER: f32 = 80.0;
pub const CARD_HEIGHT: f32 = 240.0;
pub const CARD_GAP: f32 = 24.0;
pub const CARDS_PER_ROW: usize = 3;
pub const MIN_CARD_WIDTH: f32 = 120.0;
pub const FOOTER_HEIGHT: f32 = 160.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBlock {
    pub id: String,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone)]
pub struct PageLayout {
    window: Size,
    scroll_y: f32,
    hero_height: f32,
    carousel_top: f32,
    panel_top: f32,
    sections: Vec<SectionBlock>,
    /// Card rects in page coordinates, in catalogue order.
    cards: Vec<Rect>,
    card_width: f32,
    content_height: f32,
    panel_sizes: Vec<Size>,
}

impl PageLayout {
    pub fn new(window: Size, sections: &[SectionEntry]) -> Self {
        let mut layout = Self {
            window,
            scroll_y: 0.0,
            hero_height: 0.0,
            carousel_top: 0.0,
            panel_top: 0.0,
            sections: Vec::new(),
            cards: Vec::new(),
            card_width: 0.0,
            content_height: 0.0,
            panel_sizes: Vec::new(),
        };
        layout.compute(sections);
        layout
    }

    /// Recompute block positions for a new window size.
    pub fn resize(&mut self, window: Size, sections: &[SectionEntry]) {
        self.window = window;
        self.compute(sections);
        self.scroll_y = self.scroll_y.min(self.max_scroll());
    }

    fn compute(&mut self, sections: &[SectionEntry]) {
        let row = CARDS_PER_ROW as f32;
        let content_width = self.window.width - 2.0 * PAGE_PADDING;
        self.card_width = ((content_width - (row - 1.0) * CARD_GAP) / row).max(MIN_CARD_WIDTH);
        self.hero_height = self.viewport_height().max(MIN_HERO_HEIGHT);

        let mut y = self.hero_height + BLOCK_GAP;
        self.carousel_top = y;
        y += CAROUSEL_HEIGHT + INDICATOR_ROW + BLOCK_GAP;
        self.panel_top = y;
        y += PANEL_HEIGHT;

        self.sections.clear();
        self.cards.clear();
        for section in sections {
            y += BLOCK_GAP;
            let top = y;
            y += SECTION_HEADER;
            let rows = section.cards.len().div_ceil(CARDS_PER_ROW);
            for (index, _) in section.cards.iter().enumerate() {
                let column = (index % CARDS_PER_ROW) as f32;
                let line = (index / CARDS_PER_ROW) as f32;
                self.cards.push(Rect::new(
                    PAGE_PADDING + column * (self.card_width + CARD_GAP),
                    y + line * (CARD_HEIGHT + CARD_GAP),
                    self.card_width,
                    CARD_HEIGHT,
                ));
            }
            if rows > 0 {
                y += rows as f32 * CARD_HEIGHT + (rows - 1) as f32 * CARD_GAP;
            }
            self.sections.push(SectionBlock {
                id: section.id.clone(),
                top,
                bottom: y,
            });
        }
        self.content_height = y + BLOCK_GAP + FOOTER_HEIGHT;
    }

    pub fn window(&self) -> Size {
        self.window
    }

    /// Height of the scrollable area under the nav bar.
    pub fn viewport_height(&self) -> f32 {
        (self.window.height - NAV_HEIGHT).max(0.0)
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y.clamp(0.0, self.max_scroll());
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport_height()).max(0.0)
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn hero_height(&self) -> f32 {
        self.hero_height
    }

    pub fn carousel_top(&self) -> f32 {
        self.carousel_top
    }

    pub fn panel_top(&self) -> f32 {
        self.panel_top
    }

    pub fn card_width(&self) -> f32 {
        self.card_width
    }

    pub fn sections(&self) -> &[SectionBlock] {
        &self.sections
    }

    pub fn section_spans(&self) -> Vec<SectionSpan> {
        self.sections
            .iter()
            .map(|block| SectionSpan {
                id: block.id.clone(),
                top: block.top,
                bottom: block.bottom,
            })
            .collect()
    }

    pub fn card_page_rect(&self, card: usize) -> Option<Rect> {
        self.cards.get(card).copied()
    }

    /// Page rect moved into window coordinates.
    pub fn to_window(&self, rect: Rect) -> Rect {
        rect.translate(0.0, NAV_HEIGHT - self.scroll_y)
    }

    pub fn set_panel_sizes(&mut self, sizes: Vec<Size>) {
        self.panel_sizes = sizes;
    }
}

impl LayoutProbe for PageLayout {
    fn anchor_rect(&self, anchor: AnchorId) -> Option<Rect> {
        self.card_page_rect(anchor.0).map(|rect| self.to_window(rect))
    }

    fn panel_size(&self, anchor: AnchorId) -> Option<Size> {
        if anchor.0 >= self.cards.len() {
            return None;
        }
        Some(
            self.panel_sizes
                .get(anchor.0)
                .copied()
                .unwrap_or(crate::assets::FALLBACK_PREVIEW),
        )
    }

    fn viewport(&self) -> Size {
        self.window
    }
}
