//! Obscura — selective region-blur image editor.
//!
//! The library holds the whole editing model and is fully usable headless:
//! [`session::EditorSession`] is the narrow interface the UI shell drives
//! (load image, pointer events, undo/redo/reset, blur strength, zoom,
//! export). Everything visual — file dialogs, toolbar, the egui canvas —
//! lives in the binary's `app` module and only ever calls through it.

pub mod history;
pub mod io;
pub mod logger;
pub mod ops;
pub mod regions;
pub mod selection;
pub mod session;
pub mod viewport;

pub use io::ExportFormat;
pub use regions::{BlurRegion, RegionStore};
pub use session::{EditorSession, PointerKind};
