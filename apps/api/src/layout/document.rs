//! Laid-out document model. All coordinates are millimetres from the top-left
//! corner of the page; the PDF encoder flips them into PDF user space.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Components scaled to the 0.0..=1.0 range PDF color operators expect.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// One drawing instruction on a page, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    StrokeRect {
        rect: Rect,
        line_width: f32,
        color: Rgb,
    },
    FillRect {
        rect: Rect,
        color: Rgb,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        line_width: f32,
        color: Rgb,
    },
    /// `x` is the left edge of the glyph run, `baseline` its baseline.
    Text {
        x: f32,
        baseline: f32,
        face: FontFace,
        size_pt: f32,
        color: Rgb,
        text: String,
    },
    /// Places the document's logo image into `rect`.
    Logo {
        rect: Rect,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// All text runs on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn uses_logo(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Logo { .. }))
    }
}

/// A finished layout: one entry per physical page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn uses_logo(&self) -> bool {
        self.pages.iter().any(Page::uses_logo)
    }
}
