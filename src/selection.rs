// ============================================================================
// SELECTION SESSION — in-progress drag state, finalized into a BlurRegion
// ============================================================================

use egui::Pos2;

use crate::regions::BlurRegion;

/// Transient drag endpoints in image-pixel space. Alive only between
/// pointer-down and pointer-up; never part of persisted state.
#[derive(Clone, Copy, Debug)]
pub struct SelectionDraft {
    pub start: Pos2,
    pub current: Pos2,
}

/// Tracks an in-progress rectangle drag: `Idle → Dragging → Idle`.
///
/// All positions are in image-pixel space (the caller maps display
/// coordinates first). `end` normalizes the two endpoints into a top-left
/// corner plus non-negative extents; a zero-area drag (a click, or a drag
/// along a single axis) is discarded rather than committed, so degenerate
/// rectangles never reach the region store.
#[derive(Default)]
pub struct SelectionSession {
    draft: Option<SelectionDraft>,
}

impl SelectionSession {
    pub fn new() -> Self {
        Self { draft: None }
    }

    /// Pointer-down: start a drag. A stray down while already dragging
    /// restarts from the new position.
    pub fn begin(&mut self, pos: Pos2) {
        self.draft = Some(SelectionDraft { start: pos, current: pos });
    }

    /// Pointer-move: update the live endpoint. Ignored while idle.
    pub fn update(&mut self, pos: Pos2) {
        if let Some(draft) = &mut self.draft {
            draft.current = pos;
        }
    }

    /// Pointer-up (or pointer-leave mid-drag): finalize the drag into a
    /// region carrying `strength`. Returns `None` while idle and for
    /// zero-area drags.
    pub fn end(&mut self, strength: u8) -> Option<BlurRegion> {
        let draft = self.draft.take()?;
        let width = (draft.current.x - draft.start.x).abs();
        let height = (draft.current.y - draft.start.y).abs();
        if width == 0.0 || height == 0.0 {
            return None;
        }
        Some(BlurRegion {
            x: draft.start.x.min(draft.current.x),
            y: draft.start.y.min(draft.current.y),
            width,
            height,
            strength,
        })
    }

    pub fn is_dragging(&self) -> bool {
        self.draft.is_some()
    }

    /// The live draft, for drawing the preview outline.
    pub fn draft(&self) -> Option<SelectionDraft> {
        self.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn drag_normalizes_to_top_left_corner() {
        let mut sel = SelectionSession::new();
        sel.begin(pos2(10.0, 10.0));
        sel.update(pos2(2.0, 4.0));
        let region = sel.end(5).unwrap();
        assert_eq!(region.x, 2.0);
        assert_eq!(region.y, 4.0);
        assert_eq!(region.width, 8.0);
        assert_eq!(region.height, 6.0);
        assert_eq!(region.strength, 5);
        assert!(!sel.is_dragging());
    }

    #[test]
    fn zero_area_drag_is_discarded() {
        let mut sel = SelectionSession::new();
        sel.begin(pos2(5.0, 5.0));
        sel.update(pos2(5.0, 5.0));
        assert!(sel.end(5).is_none());

        // Zero along one axis only is still degenerate.
        sel.begin(pos2(5.0, 5.0));
        sel.update(pos2(25.0, 5.0));
        assert!(sel.end(5).is_none());
    }

    #[test]
    fn end_while_idle_is_a_no_op() {
        let mut sel = SelectionSession::new();
        assert!(sel.end(5).is_none());
        // Moves while idle do not start a drag.
        sel.update(pos2(3.0, 3.0));
        assert!(!sel.is_dragging());
    }

    #[test]
    fn draft_tracks_live_endpoint() {
        let mut sel = SelectionSession::new();
        sel.begin(pos2(1.0, 1.0));
        sel.update(pos2(7.0, 9.0));
        let draft = sel.draft().unwrap();
        assert_eq!(draft.start, pos2(1.0, 1.0));
        assert_eq!(draft.current, pos2(7.0, 9.0));
    }
}
