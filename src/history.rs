// ============================================================================
// HISTORY LOG — linear undo/redo stack of region-list snapshots
// ============================================================================

use crate::regions::RegionSnapshot;

/// Linear undo/redo log holding full snapshots of the region list.
///
/// Snapshots are cheap (a handful of rectangles), so there is no command
/// machinery — just an entry vector plus a cursor. The cursor is `-1` while
/// the log is empty and otherwise always a valid index. Pushing while the
/// cursor is not at the tail discards everything after it (standard linear
/// truncation: once you edit after undoing, the redone branch is gone).
pub struct HistoryLog {
    entries: Vec<RegionSnapshot>,
    cursor: isize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self { entries: Vec::new(), cursor: -1 }
    }

    /// Truncate to `[0, cursor]`, append `snapshot`, move the cursor onto it.
    pub fn push(&mut self, snapshot: RegionSnapshot) {
        self.entries.truncate((self.cursor + 1) as usize);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() as isize - 1;
    }

    /// Step back one entry. Returns the snapshot at the new cursor, or `None`
    /// when already at the oldest entry (no-op).
    pub fn undo(&mut self) -> Option<&RegionSnapshot> {
        if self.cursor <= 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor as usize)
    }

    /// Step forward one entry. Returns the snapshot at the new cursor, or
    /// `None` when already at the newest entry (no-op).
    pub fn redo(&mut self) -> Option<&RegionSnapshot> {
        if self.cursor >= self.entries.len() as isize - 1 {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor as usize)
    }

    /// Clear the log entirely.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = -1;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len() as isize - 1
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::BlurRegion;

    fn snap(n: usize) -> RegionSnapshot {
        (0..n)
            .map(|i| BlurRegion {
                x: i as f32,
                y: 0.0,
                width: 1.0,
                height: 1.0,
                strength: 5,
            })
            .collect()
    }

    #[test]
    fn cursor_tracks_pushes() {
        let mut log = HistoryLog::new();
        assert_eq!(log.cursor(), -1);
        for n in 0..4 {
            log.push(snap(n));
            assert_eq!(log.cursor(), n as isize);
        }
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn undo_redo_walk_the_log() {
        let mut log = HistoryLog::new();
        log.push(snap(0));
        log.push(snap(1));
        log.push(snap(2));

        assert_eq!(log.undo().unwrap().len(), 1);
        assert_eq!(log.undo().unwrap().len(), 0);
        // At the oldest entry — further undo is a no-op.
        assert!(log.undo().is_none());
        assert_eq!(log.cursor(), 0);

        assert_eq!(log.redo().unwrap().len(), 1);
        assert_eq!(log.redo().unwrap().len(), 2);
        assert!(log.redo().is_none());
        assert_eq!(log.cursor(), 2);
    }

    #[test]
    fn push_after_undo_discards_forward_history() {
        // commit A, commit B, undo, commit C => B unreachable, redo no-op.
        let mut log = HistoryLog::new();
        log.push(snap(1)); // A
        log.push(snap(2)); // B
        log.undo();
        log.push(snap(3)); // C
        assert_eq!(log.len(), 2);
        assert!(log.redo().is_none());
        assert_eq!(log.cursor(), 1);
    }

    #[test]
    fn reset_empties_log() {
        let mut log = HistoryLog::new();
        log.push(snap(1));
        log.reset();
        assert!(log.is_empty());
        assert_eq!(log.cursor(), -1);
        assert!(!log.can_undo());
        assert!(!log.can_redo());
    }
}
