//! Input events consumed by the composer session.
//!
//! Only final commits cross this boundary. Intermediate gesture events
//! (drag start, drag over) stay inside the presentation layer.

use crate::model::section::SectionId;
use crate::reorder::{Direction, DragGesture};
use serde::{Deserialize, Serialize};

/// Discrete user input delivered to `Session::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ComposerEvent {
    /// Drag finished. Either side may be absent (cancelled or dropped outside).
    DragCommitted {
        source: Option<SectionId>,
        over: Option<SectionId>,
    },
    /// Editable region lost focus with `content` as its current markup.
    ContentCommitted {
        section_id: SectionId,
        content: String,
    },
    /// Edit/Preview switch pressed.
    ModeToggled,
    /// Keyboard reorder of one section by one slot.
    KeyboardMove {
        section_id: SectionId,
        direction: Direction,
    },
    Undo,
    Redo,
}

impl ComposerEvent {
    /// Stable event name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DragCommitted { .. } => "drag_committed",
            Self::ContentCommitted { .. } => "content_committed",
            Self::ModeToggled => "mode_toggled",
            Self::KeyboardMove { .. } => "keyboard_move",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

impl From<DragGesture> for ComposerEvent {
    fn from(value: DragGesture) -> Self {
        Self::DragCommitted {
            source: value.source,
            over: value.over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ComposerEvent;
    use crate::model::section::SectionId;

    #[test]
    fn events_use_tagged_wire_shape() {
        let event = ComposerEvent::DragCommitted {
            source: Some(SectionId::new("skills").unwrap()),
            over: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "drag_committed");
        assert_eq!(json["source"], "skills");
        assert!(json["over"].is_null());

        let decoded: ComposerEvent =
            serde_json::from_str(r#"{"event":"mode_toggled"}"#).unwrap();
        assert_eq!(decoded, ComposerEvent::ModeToggled);
    }
}
