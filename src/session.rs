// ============================================================================
// EDITOR SESSION — owns all mutable editing state behind a narrow interface
// ============================================================================

use egui::{Pos2, Vec2};
use image::{ImageError, RgbaImage};

use crate::history::HistoryLog;
use crate::io::{self, ExportFormat};
use crate::log_info;
use crate::ops::compositor;
use crate::regions::{
    BlurRegion, DEFAULT_BLUR_STRENGTH, MAX_BLUR_STRENGTH, MIN_BLUR_STRENGTH, RegionStore,
};
use crate::selection::SelectionSession;
use crate::viewport::Viewport;

/// Pointer event kinds fed in by the UI shell. Positions are in display
/// space, relative to the canvas's on-screen top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The pointer left the canvas mid-drag. Treated exactly like `Up`,
    /// finalizing at the last known position, so a drag can never get stuck.
    Leave,
}

/// The single mutable object of the editing session.
///
/// Everything runs in event order on one thread: the UI feeds pointer events
/// and requests (undo, redo, reset, strength, zoom, export) through this
/// interface, then asks for a fresh composite. The base raster is immutable
/// for the lifetime of a load; region store and history always reset together
/// when a new image arrives.
pub struct EditorSession {
    base: Option<RgbaImage>,
    regions: RegionStore,
    history: HistoryLog,
    selection: SelectionSession,
    viewport: Viewport,
    blur_strength: u8,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            base: None,
            regions: RegionStore::new(),
            history: HistoryLog::new(),
            selection: SelectionSession::new(),
            viewport: Viewport::new(),
            blur_strength: DEFAULT_BLUR_STRENGTH,
        }
    }

    // ---- loading ------------------------------------------------------------

    /// Decode `bytes` and start a fresh editing session on the result:
    /// regions cleared, history reset (seeded with the empty state so the
    /// first commit is undoable), zoom back to 1.0.
    ///
    /// On decode failure the prior session is left fully intact — a bad
    /// re-load must not destroy working edits.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), ImageError> {
        let decoded = io::decode_image(bytes)?;
        let (w, h) = decoded.dimensions();
        log_info!("Loaded image {}×{} ({} bytes)", w, h, bytes.len());

        self.base = Some(decoded);
        self.regions.clear();
        self.history.reset();
        self.history.push(self.regions.snapshot());
        self.selection = SelectionSession::new();
        self.viewport.reset_zoom();
        Ok(())
    }

    pub fn has_image(&self) -> bool {
        self.base.is_some()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.base.as_ref().map(|img| img.dimensions())
    }

    // ---- pointer events -----------------------------------------------------

    /// Feed one pointer event. `display_pos` is mapped into image space
    /// through the viewport; it is irrelevant for `Up`/`Leave`, which
    /// finalize at the drag's last known position.
    pub fn pointer(&mut self, kind: PointerKind, display_pos: Pos2) {
        if self.base.is_none() {
            return;
        }
        match kind {
            PointerKind::Down => {
                let pos = self.viewport.to_image_space(display_pos);
                self.selection.begin(pos);
            }
            PointerKind::Move => {
                let pos = self.viewport.to_image_space(display_pos);
                self.selection.update(pos);
            }
            PointerKind::Up | PointerKind::Leave => {
                if let Some(region) = self.selection.end(self.blur_strength) {
                    self.regions.commit(region);
                    self.history.push(self.regions.snapshot());
                }
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.selection.is_dragging()
    }

    // ---- edits --------------------------------------------------------------

    /// Set the global blur strength (clamped to the legal range). Rewrites
    /// every committed region and applies to future ones. A live preview
    /// change, so it never pushes history.
    pub fn set_blur_strength(&mut self, value: u8) {
        self.blur_strength = value.clamp(MIN_BLUR_STRENGTH, MAX_BLUR_STRENGTH);
        self.regions.set_all_strength(self.blur_strength);
    }

    pub fn blur_strength(&self) -> u8 {
        self.blur_strength
    }

    pub fn regions(&self) -> &[BlurRegion] {
        self.regions.regions()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Step back one history entry. Returns `false` at the boundary (no-op).
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.regions.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one history entry. Returns `false` at the boundary.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.regions.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Drop every region and the whole edit history.
    pub fn reset(&mut self) {
        self.regions.clear();
        self.history.reset();
        self.history.push(self.regions.snapshot());
    }

    // ---- viewport -----------------------------------------------------------

    /// Recompute the fit scale for the current container size. Without an
    /// image this is a no-op; zoom changes made before a load still stick and
    /// take effect once one arrives.
    pub fn fit(&mut self, container: Vec2) {
        if let Some((w, h)) = self.dimensions() {
            self.viewport.fit_to_container(w, h, container);
        }
    }

    /// On-screen size of the image under the current fit scale and zoom.
    pub fn display_size(&self) -> Option<Vec2> {
        self.dimensions().map(|(w, h)| self.viewport.display_size(w, h))
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset_zoom();
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    // ---- output -------------------------------------------------------------

    /// Recompute the on-screen composite: base, then every region's blur in
    /// order, then the dashed outline when a drag is live. `None` until an
    /// image is loaded.
    pub fn composite(&self) -> Option<RgbaImage> {
        let base = self.base.as_ref()?;
        let draft = self.selection.draft();
        Some(compositor::render(base, self.regions.regions(), draft.as_ref()))
    }

    /// Encode the committed composite — never the live outline — to `format`.
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, ImageError> {
        let base = self.base.as_ref().ok_or_else(|| {
            ImageError::IoError(std::io::Error::other("no image loaded"))
        })?;
        let composite = compositor::render(base, self.regions.regions(), None);
        io::encode_image(&composite, format)
    }
}
