//! Page template — the fixed chrome repeated on every page, plus all of the
//! layout constants the engine reads.
//!
//! Every number is in millimetres on an A4 page unless the field name says
//! otherwise. Nothing in the engine or the chrome renderer hard-codes a
//! coordinate; tests swap in alternate templates by editing a `TemplateConfig`.

use serde::{Deserialize, Serialize};

use crate::layout::document::{DrawOp, Page, Rect, Rgb};
use crate::layout::font_metrics::{get_metrics, FontFace, MM_PER_PT};

/// Fraction of the font size between the vertical centre of a cell and the text baseline.
const BASELINE_SHIFT: f32 = 0.3;

/// Font settings for one text role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub face: FontFace,
    pub size_pt: f32,
    /// Height of one wrapped row.
    pub line_height: f32,
}

/// Immutable page template shared by every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    /// Horizontal padding inside every text cell.
    pub cell_padding: f32,

    pub border: Rect,
    pub border_width: f32,
    pub border_color: Rgb,

    /// Logo bounds; the placeholder rectangle uses the same bounds.
    pub logo: Rect,
    /// Brand accent: logo placeholder fill and brand title color.
    pub accent: Rgb,

    pub brand_name: String,
    pub brand_origin: (f32, f32),
    pub brand_cell_height: f32,
    pub brand_size_pt: f32,

    pub divider_y: f32,
    pub divider_x: (f32, f32),
    pub divider_width: f32,
    pub divider_color: Rgb,

    /// Cursor position at the top of every page's content area.
    pub content_top: f32,
    /// Centered title drawn once, on the first page.
    pub section_title: String,
    pub title_size_pt: f32,
    pub title_cell_height: f32,
    /// Space between the section title cell and the first content line.
    pub title_gap: f32,

    pub text_color: Rgb,

    /// A non-blank line starting below this offset begins a new page.
    pub page_break_y: f32,
    /// A wrapped row whose bottom would pass this offset continues on a new page.
    pub hard_bottom: f32,

    /// Cursor advance for an empty input line.
    pub blank_gap: f32,
    /// Cursor advance after every rendered block.
    pub block_gap: f32,
    /// Extra space above a heading.
    pub heading_gap: f32,

    /// Width of every wrapped block, padding included.
    pub block_width: f32,
    /// Width of the bullet marker cell in front of a bullet block.
    pub bullet_indent: f32,
    pub bullet_glyph: String,

    pub heading: TextStyle,
    pub body: TextStyle,
}

/// Returns the default A4 template (NeuroLight branding, "Resource" title).
pub fn default_template() -> TemplateConfig {
    TemplateConfig {
        page_width: 210.0,
        page_height: 297.0,
        left_margin: 25.0,
        right_margin: 25.0,
        cell_padding: 1.0,

        border: Rect::new(15.0, 25.0, 180.0, 250.0),
        border_width: 0.2,
        border_color: Rgb::BLACK,

        logo: Rect::new(25.0, 30.0, 15.0, 15.0),
        accent: Rgb(106, 90, 205),

        brand_name: "NeuroLight".to_string(),
        brand_origin: (45.0, 33.0),
        brand_cell_height: 12.0,
        brand_size_pt: 18.0,

        divider_y: 50.0,
        divider_x: (25.0, 185.0),
        divider_width: 2.0,
        divider_color: Rgb(64, 224, 208),

        content_top: 60.0,
        section_title: "Resource".to_string(),
        title_size_pt: 14.0,
        title_cell_height: 10.0,
        title_gap: 5.0,

        text_color: Rgb::BLACK,

        page_break_y: 260.0,
        // 20 mm bottom margin on a 297 mm page.
        hard_bottom: 277.0,

        blank_gap: 2.0,
        block_gap: 1.0,
        heading_gap: 2.0,

        block_width: 150.0,
        bullet_indent: 6.0,
        bullet_glyph: "*".to_string(),

        heading: TextStyle {
            face: FontFace::HelveticaBold,
            size_pt: 11.0,
            line_height: 6.0,
        },
        body: TextStyle {
            face: FontFace::Helvetica,
            size_pt: 9.0,
            line_height: 5.0,
        },
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        default_template()
    }
}

impl TemplateConfig {
    /// Width available to text inside a wrapped block.
    pub fn block_inner_width(&self) -> f32 {
        self.block_width - 2.0 * self.cell_padding
    }

    /// Width of a zero-width cell starting at `x`: it extends to the right margin.
    fn width_to_margin(&self, x: f32) -> f32 {
        self.page_width - self.right_margin - x
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cell text placement
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAlign {
    Left,
    Center,
}

/// Geometry and content of a single-row text cell.
pub struct Cell<'a> {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: &'a str,
    pub align: CellAlign,
}

/// Draws `cell.text` inside the cell. Empty text draws nothing.
pub fn draw_cell_text(
    page: &mut Page,
    template: &TemplateConfig,
    cell: Cell<'_>,
    face: FontFace,
    size_pt: f32,
    color: Rgb,
) {
    if cell.text.is_empty() {
        return;
    }
    let offset = match cell.align {
        CellAlign::Left => template.cell_padding,
        CellAlign::Center => {
            let text_width = get_metrics(face).width_mm(cell.text, size_pt);
            (cell.width - text_width) / 2.0
        }
    };
    page.push(DrawOp::Text {
        x: cell.x + offset,
        baseline: cell.y + cell.height / 2.0 + BASELINE_SHIFT * size_pt * MM_PER_PT,
        face,
        size_pt,
        color,
        text: cell.text.to_string(),
    });
}

// ────────────────────────────────────────────────────────────────────────────
// Chrome
// ────────────────────────────────────────────────────────────────────────────

/// Draws the page chrome and returns the cursor position content starts at.
///
/// `logo_available` selects between the logo image and the accent placeholder.
/// The section title is only drawn when `first_page` is set.
pub fn render_page_chrome(
    page: &mut Page,
    template: &TemplateConfig,
    logo_available: bool,
    first_page: bool,
) -> f32 {
    page.push(DrawOp::StrokeRect {
        rect: template.border,
        line_width: template.border_width,
        color: template.border_color,
    });

    if logo_available {
        page.push(DrawOp::Logo {
            rect: template.logo,
        });
    } else {
        page.push(DrawOp::FillRect {
            rect: template.logo,
            color: template.accent,
        });
    }

    let (brand_x, brand_y) = template.brand_origin;
    draw_cell_text(
        page,
        template,
        Cell {
            x: brand_x,
            y: brand_y,
            width: template.width_to_margin(brand_x),
            height: template.brand_cell_height,
            text: &template.brand_name,
            align: CellAlign::Left,
        },
        FontFace::HelveticaBold,
        template.brand_size_pt,
        template.accent,
    );

    page.push(DrawOp::Line {
        from: (template.divider_x.0, template.divider_y),
        to: (template.divider_x.1, template.divider_y),
        line_width: template.divider_width,
        color: template.divider_color,
    });

    let mut cursor = template.content_top;
    if first_page {
        draw_cell_text(
            page,
            template,
            Cell {
                x: template.left_margin,
                y: cursor,
                width: template.width_to_margin(template.left_margin),
                height: template.title_cell_height,
                text: &template.section_title,
                align: CellAlign::Center,
            },
            FontFace::HelveticaBold,
            template.title_size_pt,
            template.text_color,
        );
        cursor += template.title_cell_height + template.title_gap;
    }
    cursor
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
