//! PDF encoder — turns a laid-out [`Document`] into PDF bytes with `pdf-writer`.
//!
//! Layout coordinates are millimetres from the top-left corner; PDF user space
//! is points from the bottom-left, so every y is flipped against the page height.
//! No timestamps are written: the same document always encodes to the same bytes.

use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect as PdfRect, Ref, Str, TextStr};

use crate::layout::document::{Document, DrawOp, Page, Rect, Rgb};
use crate::layout::font_metrics::{FontFace, MM_PER_PT};
use crate::layout::template::TemplateConfig;
use crate::render::logo::LogoImage;
use crate::render::RenderError;

const PRODUCER: &str = concat!("pdfsmith ", env!("CARGO_PKG_VERSION"));
const LOGO_RESOURCE: &[u8] = b"Im1";

/// Sequential object id allocator.
struct RefAlloc(i32);

impl RefAlloc {
    fn next(&mut self) -> Ref {
        let r = Ref::new(self.0);
        self.0 += 1;
        r
    }
}

/// Encodes `doc` as a complete PDF file.
///
/// `logo` must be present if any page places the logo image.
pub fn encode(
    doc: &Document,
    template: &TemplateConfig,
    logo: Option<&LogoImage>,
) -> Result<Vec<u8>, RenderError> {
    if doc.pages.is_empty() {
        return Err(RenderError::Encode("document has no pages".to_string()));
    }
    if doc.uses_logo() && logo.is_none() {
        return Err(RenderError::Encode(
            "logo placed on a page but no logo image was loaded".to_string(),
        ));
    }

    let mut pdf = Pdf::new();
    let mut alloc = RefAlloc(1);

    let catalog_id = alloc.next();
    let pages_id = alloc.next();
    let info_id = alloc.next();

    let font_refs: Vec<(FontFace, Ref)> = FontFace::ALL
        .iter()
        .map(|&face| {
            let id = alloc.next();
            pdf.type1_font(id)
                .base_font(Name(face.base_font().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            (face, id)
        })
        .collect();

    let logo_ref = logo.map(|img| embed_logo(&mut pdf, &mut alloc, img));

    let page_ids: Vec<(Ref, Ref)> = doc
        .pages
        .iter()
        .map(|_| (alloc.next(), alloc.next()))
        .collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    let mut info = pdf.document_info(info_id);
    info.producer(TextStr(PRODUCER));
    if !template.section_title.is_empty() {
        info.title(TextStr(&template.section_title));
    }
    info.finish();

    let media_box = PdfRect::new(
        0.0,
        0.0,
        to_pt(template.page_width),
        to_pt(template.page_height),
    );

    for (page, &(page_id, content_id)) in doc.pages.iter().zip(page_ids.iter()) {
        let raw = page_content(page, template.page_height);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        let mut page_writer = pdf.page(page_id);
        page_writer
            .media_box(media_box)
            .parent(pages_id)
            .contents(content_id);
        {
            let mut resources = page_writer.resources();
            {
                let mut fonts = resources.fonts();
                for (face, font_ref) in &font_refs {
                    fonts.pair(Name(face.resource_name().as_bytes()), *font_ref);
                }
            }
            if let (Some(xobj_ref), true) = (logo_ref, page.uses_logo()) {
                resources.x_objects().pair(Name(LOGO_RESOURCE), xobj_ref);
            }
        }
        page_writer.finish();
    }

    let bytes = pdf.finish();
    if bytes.is_empty() {
        return Err(RenderError::EmptyOutput);
    }
    Ok(bytes)
}

fn embed_logo(pdf: &mut Pdf, alloc: &mut RefAlloc, logo: &LogoImage) -> Ref {
    let xobj_ref = alloc.next();

    let smask_ref = logo.alpha.as_ref().map(|alpha| {
        let mask_ref = alloc.next();
        let mut mask = pdf.image_xobject(mask_ref, alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(logo.width as i32);
        mask.height(logo.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask_ref
    });

    let mut xobj = pdf.image_xobject(xobj_ref, &logo.rgb);
    xobj.filter(Filter::FlateDecode);
    xobj.width(logo.width as i32);
    xobj.height(logo.height as i32);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    if let Some(mask_ref) = smask_ref {
        xobj.s_mask(mask_ref);
    }
    xobj_ref
}

/// Builds the uncompressed content stream for one page.
fn page_content(page: &Page, page_height: f32) -> Vec<u8> {
    let mut content = Content::new();
    let flip = |y: f32| to_pt(page_height - y);

    for op in &page.ops {
        match op {
            DrawOp::StrokeRect { rect, line_width, color } => {
                set_stroke(&mut content, *color);
                content.set_line_width(to_pt(*line_width));
                let (x, y, w, h) = rect_pt(rect, page_height);
                content.rect(x, y, w, h);
                content.stroke();
            }
            DrawOp::FillRect { rect, color } => {
                set_fill(&mut content, *color);
                let (x, y, w, h) = rect_pt(rect, page_height);
                content.rect(x, y, w, h);
                content.fill_nonzero();
            }
            DrawOp::Line { from, to, line_width, color } => {
                set_stroke(&mut content, *color);
                content.set_line_width(to_pt(*line_width));
                content.move_to(to_pt(from.0), flip(from.1));
                content.line_to(to_pt(to.0), flip(to.1));
                content.stroke();
            }
            DrawOp::Text { x, baseline, face, size_pt, color, text } => {
                set_fill(&mut content, *color);
                content.begin_text();
                content.set_font(Name(face.resource_name().as_bytes()), *size_pt);
                content.next_line(to_pt(*x), flip(*baseline));
                content.show(Str(&latin1_bytes(text)));
                content.end_text();
            }
            DrawOp::Logo { rect } => {
                let (x, y, w, h) = rect_pt(rect, page_height);
                content.save_state();
                content.transform([w, 0.0, 0.0, h, x, y]);
                content.x_object(Name(LOGO_RESOURCE));
                content.restore_state();
            }
        }
    }
    content.finish()
}

fn to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// Converts a top-left-origin rectangle into PDF `(x, y_bottom, width, height)` points.
fn rect_pt(rect: &Rect, page_height: f32) -> (f32, f32, f32, f32) {
    (
        to_pt(rect.x),
        to_pt(page_height - rect.y - rect.height),
        to_pt(rect.width),
        to_pt(rect.height),
    )
}

fn set_fill(content: &mut Content, color: Rgb) {
    let (r, g, b) = color.to_unit();
    content.set_fill_rgb(r, g, b);
}

fn set_stroke(content: &mut Content, color: Rgb) {
    let (r, g, b) = color.to_unit();
    content.set_stroke_rgb(r, g, b);
}

/// One byte per character. WinAnsiEncoding matches Latin-1 outside 0x80..=0x9F.
fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|c| u8::try_from(c as u32).ok())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
