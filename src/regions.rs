// ============================================================================
// BLUR REGIONS — committed rectangular edits and their ordered store
// ============================================================================

/// Minimum blur strength selectable in the UI (pixels).
pub const MIN_BLUR_STRENGTH: u8 = 1;
/// Maximum blur strength selectable in the UI (pixels).
pub const MAX_BLUR_STRENGTH: u8 = 20;
/// Strength a fresh session starts with.
pub const DEFAULT_BLUR_STRENGTH: u8 = 5;

/// One committed blur edit: a rectangle in image-pixel coordinates plus the
/// blur strength (in pixels) applied inside it.
///
/// `(x, y)` is the top-left corner after drag normalization; `width` and
/// `height` are never negative. Coordinates may extend past the image edges —
/// the compositor clips when painting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlurRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Blur strength in pixels, always within [MIN_BLUR_STRENGTH, MAX_BLUR_STRENGTH].
    pub strength: u8,
}

/// A full copy of the region list at one point in edit history.
pub type RegionSnapshot = Vec<BlurRegion>;

/// Ordered collection of committed blur regions — the single source of truth
/// for what edits exist. Insertion order is compositing order: regions
/// painted later blur the already-blurred output of earlier overlapping ones.
///
/// Regions are append-only within a session; the list is only ever replaced
/// wholesale (history restore) or cleared (reset / new image).
#[derive(Default)]
pub struct RegionStore {
    regions: Vec<BlurRegion>,
}

impl RegionStore {
    pub fn new() -> Self {
        Self { regions: Vec::new() }
    }

    /// Append a committed region.
    pub fn commit(&mut self, region: BlurRegion) {
        self.regions.push(region);
    }

    /// Rewrite every region's strength to `value`. Geometry is untouched.
    /// Deliberately does NOT interact with history — the caller treats a
    /// strength-only change as a live preview, not an undoable edit.
    pub fn set_all_strength(&mut self, value: u8) {
        for region in &mut self.regions {
            region.strength = value;
        }
    }

    /// Drop all regions.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Replace the whole list from a history snapshot.
    pub fn restore(&mut self, snapshot: &RegionSnapshot) {
        self.regions = snapshot.clone();
    }

    /// Deep copy of the current list, suitable for a history entry.
    pub fn snapshot(&self) -> RegionSnapshot {
        self.regions.clone()
    }

    pub fn regions(&self) -> &[BlurRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: f32, y: f32, w: f32, h: f32, strength: u8) -> BlurRegion {
        BlurRegion { x, y, width: w, height: h, strength }
    }

    #[test]
    fn commit_preserves_insertion_order() {
        let mut store = RegionStore::new();
        store.commit(region(0.0, 0.0, 10.0, 10.0, 5));
        store.commit(region(5.0, 5.0, 10.0, 10.0, 8));
        assert_eq!(store.len(), 2);
        assert_eq!(store.regions()[0].strength, 5);
        assert_eq!(store.regions()[1].strength, 8);
    }

    #[test]
    fn bulk_strength_change_keeps_geometry() {
        let mut store = RegionStore::new();
        store.commit(region(1.0, 2.0, 3.0, 4.0, 5));
        store.commit(region(10.0, 20.0, 30.0, 40.0, 7));
        store.set_all_strength(12);
        for r in store.regions() {
            assert_eq!(r.strength, 12);
        }
        assert_eq!(store.regions()[0].x, 1.0);
        assert_eq!(store.regions()[1].height, 40.0);
    }

    #[test]
    fn restore_replaces_list_wholesale() {
        let mut store = RegionStore::new();
        store.commit(region(0.0, 0.0, 1.0, 1.0, 5));
        let saved = store.snapshot();
        store.commit(region(9.0, 9.0, 1.0, 1.0, 5));
        store.restore(&saved);
        assert_eq!(store.len(), 1);
        store.restore(&Vec::new());
        assert!(store.is_empty());
    }
}
