//! Export bridge to the external document-generation collaborator.
//!
//! # Responsibility
//! - Capture a stable snapshot of the current render.
//! - Invoke the rasterization collaborator once per request and surface its
//!   outcome as a non-fatal result.
//!
//! # Invariants
//! - Export never mutates the document and takes no lock on it.
//! - Concurrent export requests are independent; none are coalesced.
//! - Collaborator failures and panics become `ExportResult::Failure`.

pub mod bridge;
pub mod file_writer;
pub mod options;
pub mod snapshot;

pub use bridge::{
    ExportBridge, ExportFailure, ExportNotice, ExportResult, NoticeLevel, RasterizeError,
    Rasterizer,
};
pub use file_writer::SnapshotFileWriter;
pub use options::{
    ContentDensity, ExportOptions, ExportOptionsError, ImageFormat, LengthUnit, Orientation,
    PageMargins, PageSize,
};
pub use snapshot::RenderSnapshot;
