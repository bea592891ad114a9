//! Immutable render snapshot handed to the rasterizer.

use crate::mode::Mode;
use crate::model::section::SectionId;
use std::sync::Arc;

/// Rendered document captured at export time.
///
/// Cloning shares the captured markup; later edits never reach a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    markup: Arc<str>,
    mode: Mode,
    section_order: Arc<[SectionId]>,
}

impl RenderSnapshot {
    pub fn new(markup: impl Into<String>, mode: Mode, section_order: Vec<SectionId>) -> Self {
        Self {
            markup: Arc::from(markup.into()),
            mode,
            section_order: section_order.into(),
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Mode the document was rendered in when captured.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn section_order(&self) -> &[SectionId] {
        &self.section_order
    }

    /// True when the capture contains editing affordances.
    pub fn includes_edit_chrome(&self) -> bool {
        self.mode.is_edit()
    }
}
