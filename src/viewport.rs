// ============================================================================
// VIEWPORT — fit-to-container scale, user zoom, display↔image mapping
// ============================================================================

use egui::{Pos2, Vec2, pos2, vec2};

/// Minimum user zoom factor.
pub const ZOOM_MIN: f32 = 0.1;
/// Maximum user zoom factor.
pub const ZOOM_MAX: f32 = 3.0;
/// Zoom increment per zoom-in/zoom-out step.
pub const ZOOM_STEP: f32 = 0.1;

/// Owns the derived fit-to-container scale and the user zoom factor.
///
/// `display_scale` aspect-fits the image into its container; `zoom` is
/// applied multiplicatively on top. Both affect only the on-screen display
/// size — the underlying raster always stays at the image's native
/// resolution, so image-space coordinates are unaffected by zoom.
pub struct Viewport {
    display_scale: f32,
    zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self { display_scale: 1.0, zoom: 1.0 }
    }

    /// Recompute `display_scale` by aspect-fitting an `img_w × img_h` image
    /// into `container`. A wider-than-container image fits to the container
    /// width, otherwise to its height.
    pub fn fit_to_container(&mut self, img_w: u32, img_h: u32, container: Vec2) {
        if img_w == 0 || img_h == 0 || container.x <= 0.0 || container.y <= 0.0 {
            self.display_scale = 1.0;
            return;
        }
        let img_aspect = img_w as f32 / img_h as f32;
        let container_aspect = container.x / container.y;
        self.display_scale = if img_aspect > container_aspect {
            container.x / img_w as f32
        } else {
            container.y / img_h as f32
        };
    }

    /// On-screen size of the image under the current scale and zoom.
    pub fn display_size(&self, img_w: u32, img_h: u32) -> Vec2 {
        let s = self.effective_scale();
        vec2(img_w as f32 * s, img_h as f32 * s)
    }

    /// Combined display factor: fit scale × user zoom.
    pub fn effective_scale(&self) -> f32 {
        self.display_scale * self.zoom
    }

    /// Map a pointer position (relative to the canvas's on-screen top-left)
    /// into image-pixel space. No clamping: out-of-bounds points are legal
    /// and simply yield regions extending past the image edges.
    pub fn to_image_space(&self, display_pos: Pos2) -> Pos2 {
        let s = self.effective_scale();
        pos2(display_pos.x / s, display_pos.y / s)
    }

    /// Inverse of `to_image_space`, for positioning overlays on screen.
    pub fn to_display_space(&self, image_pos: Pos2) -> Pos2 {
        let s = self.effective_scale();
        pos2(image_pos.x * s, image_pos.y * s)
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn display_scale(&self) -> f32 {
        self.display_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_fits_to_container_width() {
        let mut vp = Viewport::new();
        // 200×100 image into a 100×100 container: width-fit, scale 0.5.
        vp.fit_to_container(200, 100, vec2(100.0, 100.0));
        assert!((vp.display_scale() - 0.5).abs() < 1e-6);
        let size = vp.display_size(200, 100);
        assert!((size.x - 100.0).abs() < 1e-4);
        assert!((size.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn tall_image_fits_to_container_height() {
        let mut vp = Viewport::new();
        // 100×400 image into a 200×100 container: height-fit, scale 0.25.
        vp.fit_to_container(100, 400, vec2(200.0, 100.0));
        assert!((vp.display_scale() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn zoom_saturates_at_both_ends() {
        let mut vp = Viewport::new();
        for _ in 0..50 {
            vp.zoom_in();
        }
        assert!((vp.zoom() - ZOOM_MAX).abs() < 1e-6);
        for _ in 0..50 {
            vp.zoom_out();
        }
        assert!((vp.zoom() - ZOOM_MIN).abs() < 1e-6);
        vp.reset_zoom();
        assert_eq!(vp.zoom(), 1.0);
    }

    #[test]
    fn coordinate_mapping_round_trips() {
        let mut vp = Viewport::new();
        vp.fit_to_container(200, 100, vec2(100.0, 100.0));
        vp.set_zoom(1.7);
        let display = pos2(37.5, 12.25);
        let image = vp.to_image_space(display);
        let back = vp.to_display_space(image);
        assert!((back.x - display.x).abs() < 1e-4);
        assert!((back.y - display.y).abs() < 1e-4);
    }

    #[test]
    fn zoom_scales_display_only() {
        let mut vp = Viewport::new();
        vp.fit_to_container(100, 100, vec2(100.0, 100.0));
        let image = vp.to_image_space(pos2(50.0, 50.0));
        vp.zoom_in();
        // The same image point now lives at a different screen position,
        // but mapping the new screen position back yields the same point.
        let display = vp.to_display_space(image);
        let again = vp.to_image_space(display);
        assert!((again.x - image.x).abs() < 1e-4);
        assert!((again.y - image.y).abs() < 1e-4);
    }
}
