//! Core domain logic for the section composer.
//! This crate is the single source of truth for ordering, mode and export
//! invariants.

pub mod config;
pub mod event;
pub mod export;
pub mod logging;
pub mod mode;
pub mod model;
pub mod reorder;
pub mod session;
pub mod store;
pub mod template;
pub mod view;

pub use config::{ComposerConfig, ConfigError};
pub use event::ComposerEvent;
pub use export::{
    ExportBridge, ExportFailure, ExportNotice, ExportOptions, ExportOptionsError, ExportResult,
    NoticeLevel, RasterizeError, Rasterizer, RenderSnapshot, SnapshotFileWriter,
};
pub use logging::{
    default_log_level, init_logging, init_logging_with_config, logging_status, LoggingError,
};
pub use mode::{Mode, ModeController};
pub use model::document::{Document, DocumentError};
pub use model::section::{Section, SectionId, SectionKind, SectionValidationError};
pub use reorder::{Direction, DragGesture, NoOpReason, ReorderEngine, ReorderPlan};
pub use session::{DispatchOutcome, IgnoreReason, Session};
pub use store::{SectionStore, StoreUpdate};
pub use template::{default_resume, load_template_json, TemplateError};
pub use view::{plain_text, DocumentView, KindStyle, SectionView, ViewBody};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
