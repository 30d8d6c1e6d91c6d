//! Document layout engine — the pagination loop.
//!
//! # Cursor rules
//! - Each page starts at `content_top` (first page: below the section title).
//! - Blank lines advance by `blank_gap` and never trigger a page break.
//! - Before a non-blank line is drawn, a cursor past `page_break_y` starts a new page.
//!   The check runs once per line, so a tall wrapped block may run past `page_break_y`.
//! - A single row is never drawn past `hard_bottom`; the block continues on a new page.

use crate::layout::classify::{classify_line, StyleRole};
use crate::layout::document::{Document, Page};
use crate::layout::font_metrics::{get_metrics, wrap_rows};
use crate::layout::template::{
    draw_cell_text, render_page_chrome, Cell, CellAlign, TemplateConfig, TextStyle,
};

/// Lays out sanitized `text` onto as many pages as it needs.
///
/// Never fails: every input, including one with no printable lines, yields at
/// least the first page with its chrome.
pub fn layout(text: &str, template: &TemplateConfig, logo_available: bool) -> Document {
    let mut engine = LayoutEngine::new(template, logo_available);
    for raw in text.split('\n') {
        engine.place_line(raw.trim());
    }
    engine.finish()
}

struct LayoutEngine<'a> {
    template: &'a TemplateConfig,
    logo_available: bool,
    pages: Vec<Page>,
    cursor: f32,
}

impl<'a> LayoutEngine<'a> {
    fn new(template: &'a TemplateConfig, logo_available: bool) -> Self {
        let mut engine = LayoutEngine {
            template,
            logo_available,
            pages: Vec::new(),
            cursor: template.content_top,
        };
        engine.start_page();
        engine
    }

    fn start_page(&mut self) {
        let first_page = self.pages.is_empty();
        let mut page = Page::default();
        self.cursor =
            render_page_chrome(&mut page, self.template, self.logo_available, first_page);
        self.pages.push(page);
    }

    fn page(&mut self) -> &mut Page {
        // start_page runs in `new`, so there is always a current page.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn place_line(&mut self, trimmed: &str) {
        let t = self.template;
        if trimmed.is_empty() {
            self.cursor += t.blank_gap;
            return;
        }

        if self.cursor > t.page_break_y {
            self.start_page();
        }

        let line = classify_line(trimmed);
        match line.role {
            StyleRole::Heading => {
                self.cursor += t.heading_gap;
                self.draw_block(t.left_margin, &line.display, t.heading);
            }
            StyleRole::Bullet => {
                self.ensure_room(t.body.line_height);
                let marker_y = self.cursor;
                draw_cell_text(
                    self.page(),
                    t,
                    Cell {
                        x: t.left_margin,
                        y: marker_y,
                        width: t.bullet_indent,
                        height: t.body.line_height,
                        text: &t.bullet_glyph,
                        align: CellAlign::Left,
                    },
                    t.body.face,
                    t.body.size_pt,
                    t.text_color,
                );
                self.draw_block(t.left_margin + t.bullet_indent, &line.display, t.body);
            }
            StyleRole::Paragraph => {
                self.draw_block(t.left_margin, &line.display, t.body);
            }
            StyleRole::Blank => {}
        }
        self.cursor += t.block_gap;
    }

    /// Draws `text` as a wrapped block starting at `x`, advancing the cursor one row at a time.
    fn draw_block(&mut self, x: f32, text: &str, style: TextStyle) {
        let t = self.template;
        let rows = wrap_rows(text, get_metrics(style.face), style.size_pt, t.block_inner_width());
        for row in &rows {
            self.ensure_room(style.line_height);
            let y = self.cursor;
            draw_cell_text(
                self.page(),
                t,
                Cell {
                    x,
                    y,
                    width: t.block_width,
                    height: style.line_height,
                    text: row,
                    align: CellAlign::Left,
                },
                style.face,
                style.size_pt,
                t.text_color,
            );
            self.cursor += style.line_height;
        }
    }

    /// Starts a new page when a row of `height` would cross the hard bottom.
    fn ensure_room(&mut self, height: f32) {
        let t = self.template;
        if self.cursor + height > t.hard_bottom && self.cursor > t.content_top {
            self.start_page();
        }
    }

    fn finish(self) -> Document {
        Document { pages: self.pages }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
