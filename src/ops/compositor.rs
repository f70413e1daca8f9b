// ============================================================================
// COMPOSITOR — base image + ordered region blurs + optional live outline
// ============================================================================

use image::{Rgba, RgbaImage};

use crate::ops::filters::blur_region;
use crate::regions::BlurRegion;
use crate::selection::SelectionDraft;

/// Stroke thickness of the live selection outline, in image pixels.
const OUTLINE_THICKNESS: i64 = 2;
/// Dash pattern of the outline: 5 px on, 5 px off.
const OUTLINE_DASH: i64 = 5;
const OUTLINE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Produce the full composite: the base image, then each region's blur
/// applied in list order as an in-place pass over the shared raster, then
/// (for on-screen preview only) a dashed outline for an in-progress drag.
///
/// This is a pure function of its inputs — every call recomputes from the
/// base raster, never from a previous composite, so redrawing on each
/// pointer-move accumulates nothing. The output always has the base image's
/// native resolution; display scaling is the viewport's business.
///
/// Exports must pass `live = None`: the outline is preview chrome and must
/// never be baked into saved output.
pub fn render(
    base: &RgbaImage,
    regions: &[BlurRegion],
    live: Option<&SelectionDraft>,
) -> RgbaImage {
    let mut canvas = base.clone();
    for region in regions {
        blur_region(&mut canvas, region);
    }
    if let Some(draft) = live {
        draw_dashed_rect(&mut canvas, draft);
    }
    canvas
}

/// Dashed stroke rectangle across the draft's current bounds. Endpoints are
/// normalized here, so a drag toward the upper-left draws the same outline
/// as one toward the lower-right.
fn draw_dashed_rect(canvas: &mut RgbaImage, draft: &SelectionDraft) {
    let x0 = draft.start.x.min(draft.current.x).round() as i64;
    let y0 = draft.start.y.min(draft.current.y).round() as i64;
    let x1 = draft.start.x.max(draft.current.x).round() as i64;
    let y1 = draft.start.y.max(draft.current.y).round() as i64;

    // Horizontal edges: dash phase runs along x.
    for x in x0..=x1 {
        if ((x - x0) / OUTLINE_DASH) % 2 == 0 {
            for t in 0..OUTLINE_THICKNESS {
                put_clipped(canvas, x, y0 + t);
                put_clipped(canvas, x, y1 - t);
            }
        }
    }
    // Vertical edges: dash phase runs along y.
    for y in y0..=y1 {
        if ((y - y0) / OUTLINE_DASH) % 2 == 0 {
            for t in 0..OUTLINE_THICKNESS {
                put_clipped(canvas, x0 + t, y);
                put_clipped(canvas, x1 - t, y);
            }
        }
    }
}

fn put_clipped(canvas: &mut RgbaImage, x: i64, y: i64) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, OUTLINE_COLOR);
    }
}
