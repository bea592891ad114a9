//! Composer session: event dispatch over one active document.
//!
//! # Responsibility
//! - Route input events through the mode gate into the reorder engine or the
//!   content-edit path.
//! - Project the current document into views and export snapshots.
//!
//! # Invariants
//! - Events are processed one at a time, each to completion.
//! - Invalid references and mode violations are silent no-ops, never errors.
//! - Export captures a snapshot before suspending and holds no borrow of
//!   the session while the collaborator runs.

use crate::config::ComposerConfig;
use crate::event::ComposerEvent;
use crate::export::{ExportBridge, ExportResult, Rasterizer, RenderSnapshot};
use crate::mode::{Mode, ModeController};
use crate::model::document::Document;
use crate::model::section::SectionId;
use crate::reorder::{DragGesture, NoOpReason, ReorderEngine, ReorderPlan};
use crate::store::{SectionStore, StoreUpdate};
use crate::template::default_resume;
use crate::view::DocumentView;
use log::debug;
use std::future::Future;

/// Why an event left the document unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Mutation attempted while previewing.
    ModeViolation,
    /// Event named a section absent from the document.
    InvalidReference(SectionId),
    /// Event was valid but resolved to no change.
    NoOp,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModeViolation => "mode_violation",
            Self::InvalidReference(_) => "invalid_reference",
            Self::NoOp => "noop",
        }
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl From<StoreUpdate> for DispatchOutcome {
    fn from(value: StoreUpdate) -> Self {
        match value {
            StoreUpdate::Applied => Self::Applied,
            StoreUpdate::Unchanged => Self::Ignored(IgnoreReason::NoOp),
        }
    }
}

/// One composing session over a single document.
#[derive(Debug, Clone)]
pub struct Session {
    mode: ModeController,
    store: SectionStore,
    engine: ReorderEngine,
}

impl Session {
    /// Starts a session over `document` using `config` for mode and history.
    pub fn new(document: Document, config: &ComposerConfig) -> Self {
        Self {
            mode: ModeController::new(config.initial_mode),
            store: SectionStore::with_history_limit(document, config.history_limit),
            engine: ReorderEngine::new(),
        }
    }

    /// Session over the built-in resume template with default config.
    pub fn with_default_template() -> Self {
        Self::new(default_resume(), &ComposerConfig::default())
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn mode_controller(&self) -> &ModeController {
        &self.mode
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn order(&self) -> Vec<&SectionId> {
        self.store.order()
    }

    pub fn can_undo(&self) -> bool {
        self.mode.can_edit_content() && self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.mode.can_edit_content() && self.store.can_redo()
    }

    /// Applies one input event.
    pub fn dispatch(&mut self, event: ComposerEvent) -> DispatchOutcome {
        let name = event.name();
        let outcome = match event {
            ComposerEvent::ModeToggled => {
                self.mode.toggle();
                DispatchOutcome::Applied
            }
            ComposerEvent::DragCommitted { source, over } => {
                self.commit_gesture(DragGesture { source, over })
            }
            ComposerEvent::KeyboardMove {
                section_id,
                direction,
            } => {
                if !self.mode.can_reorder() {
                    DispatchOutcome::Ignored(IgnoreReason::ModeViolation)
                } else if !self.store.document().contains(section_id.as_str()) {
                    DispatchOutcome::Ignored(IgnoreReason::InvalidReference(section_id))
                } else {
                    let gesture = self
                        .engine
                        .nudge(self.store.document(), &section_id, direction);
                    self.commit_gesture(gesture)
                }
            }
            ComposerEvent::ContentCommitted {
                section_id,
                content,
            } => self.commit_content(section_id, content),
            ComposerEvent::Undo => match self.mode.edit_access() {
                Some(access) => self.store.undo(&access).into(),
                None => DispatchOutcome::Ignored(IgnoreReason::ModeViolation),
            },
            ComposerEvent::Redo => match self.mode.edit_access() {
                Some(access) => self.store.redo(&access).into(),
                None => DispatchOutcome::Ignored(IgnoreReason::ModeViolation),
            },
        };

        match &outcome {
            DispatchOutcome::Applied => debug!(
                "event=dispatch module=session status=applied input={} mode={}",
                name,
                self.mode.mode()
            ),
            DispatchOutcome::Ignored(reason) => debug!(
                "event=dispatch module=session status=ignored input={} mode={} reason={}",
                name,
                self.mode.mode(),
                reason.as_str()
            ),
        }
        outcome
    }

    /// Render projection of the current document in the current mode.
    pub fn view(&self) -> DocumentView {
        DocumentView::project(self.store.document(), self.mode.mode())
    }

    /// Captures the current render for export.
    pub fn snapshot(&self) -> RenderSnapshot {
        self.view().snapshot()
    }

    /// Starts an export of the current render.
    ///
    /// The snapshot is taken immediately; the returned future only borrows
    /// the bridge, so the session stays editable while it runs.
    pub fn export<'b, R: Rasterizer + 'b>(
        &self,
        bridge: &'b ExportBridge<R>,
    ) -> impl Future<Output = ExportResult> + 'b {
        let snapshot = self.snapshot();
        bridge.export(snapshot)
    }

    fn commit_gesture(&mut self, gesture: DragGesture) -> DispatchOutcome {
        let Some(access) = self.mode.edit_access() else {
            return DispatchOutcome::Ignored(IgnoreReason::ModeViolation);
        };
        let plan = self.engine.plan(self.store.document(), &gesture);
        match plan {
            ReorderPlan::Move { .. } => {
                let next = self.engine.apply(self.store.document(), &plan);
                self.store.replace(&access, next).into()
            }
            ReorderPlan::NoOp(NoOpReason::UnknownSection(id)) => {
                DispatchOutcome::Ignored(IgnoreReason::InvalidReference(id))
            }
            ReorderPlan::NoOp(_) => DispatchOutcome::Ignored(IgnoreReason::NoOp),
        }
    }

    fn commit_content(&mut self, section_id: SectionId, content: String) -> DispatchOutcome {
        let Some(access) = self.mode.edit_access() else {
            return DispatchOutcome::Ignored(IgnoreReason::ModeViolation);
        };
        if !self.store.document().contains(section_id.as_str()) {
            return DispatchOutcome::Ignored(IgnoreReason::InvalidReference(section_id));
        }
        self.store
            .set_content(&access, section_id.as_str(), content)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::{DispatchOutcome, IgnoreReason, Session};
    use crate::event::ComposerEvent;
    use crate::mode::Mode;
    use crate::model::section::SectionId;
    use crate::reorder::Direction;

    fn id(value: &str) -> SectionId {
        SectionId::new(value).unwrap()
    }

    fn order(session: &Session) -> Vec<String> {
        session.order().iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn keyboard_move_at_edge_is_noop() {
        let mut session = Session::with_default_template();
        let outcome = session.dispatch(ComposerEvent::KeyboardMove {
            section_id: id("header"),
            direction: Direction::Up,
        });
        assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::NoOp));

        let outcome = session.dispatch(ComposerEvent::KeyboardMove {
            section_id: id("header"),
            direction: Direction::Down,
        });
        assert!(outcome.is_applied());
        assert_eq!(order(&session), ["experience", "header", "education", "skills"]);
    }

    #[test]
    fn unknown_ids_are_invalid_references() {
        let mut session = Session::with_default_template();
        assert_eq!(
            session.dispatch(ComposerEvent::ContentCommitted {
                section_id: id("ghost"),
                content: "x".to_string(),
            }),
            DispatchOutcome::Ignored(IgnoreReason::InvalidReference(id("ghost")))
        );
        assert_eq!(
            session.dispatch(ComposerEvent::DragCommitted {
                source: Some(id("skills")),
                over: Some(id("ghost")),
            }),
            DispatchOutcome::Ignored(IgnoreReason::InvalidReference(id("ghost")))
        );
    }

    #[test]
    fn undo_is_gated_by_mode() {
        let mut session = Session::with_default_template();
        session.dispatch(ComposerEvent::DragCommitted {
            source: Some(id("skills")),
            over: Some(id("header")),
        });
        session.dispatch(ComposerEvent::ModeToggled);
        assert_eq!(session.mode(), Mode::Preview);
        assert!(!session.can_undo());
        assert_eq!(
            session.dispatch(ComposerEvent::Undo),
            DispatchOutcome::Ignored(IgnoreReason::ModeViolation)
        );

        session.dispatch(ComposerEvent::ModeToggled);
        assert!(session.dispatch(ComposerEvent::Undo).is_applied());
        assert_eq!(order(&session), ["header", "experience", "education", "skills"]);
        assert!(session.dispatch(ComposerEvent::Redo).is_applied());
        assert_eq!(order(&session), ["skills", "header", "experience", "education"]);
    }
}
