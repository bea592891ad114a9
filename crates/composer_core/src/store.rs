//! Section store: the single source of truth for the active document.
//!
//! # Responsibility
//! - Hold the current `Document` snapshot and swap it on every update.
//! - Keep a bounded undo/redo history of previous snapshots.
//!
//! # Invariants
//! - Every mutation requires an `EditAccess` token from `ModeController` and
//!   is reachable only from inside the crate.
//! - A replacement snapshot must hold exactly the current id set.
//! - Snapshots handed out earlier are never modified by later updates.
//! - No-op updates leave both the snapshot and the history untouched.
//! - A new applied update clears the redo stack.

use crate::mode::EditAccess;
use crate::model::document::Document;
use crate::model::section::SectionId;
use log::{debug, warn};
use std::collections::{HashSet, VecDeque};

/// Default number of undo steps kept by the store.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Outcome of one store update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreUpdate {
    /// A new snapshot replaced the current one.
    Applied,
    /// The update resolved to a no-op; the current snapshot is unchanged.
    Unchanged,
}

impl StoreUpdate {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Owner of the ordered section collection.
#[derive(Debug, Clone)]
pub struct SectionStore {
    current: Document,
    undo_stack: VecDeque<Document>,
    redo_stack: Vec<Document>,
    history_limit: usize,
}

impl SectionStore {
    /// Creates a store over an initial document with the default history limit.
    pub fn new(document: Document) -> Self {
        Self::with_history_limit(document, DEFAULT_HISTORY_LIMIT)
    }

    /// Creates a store keeping at most `history_limit` undo steps.
    ///
    /// A limit of `0` disables history.
    pub fn with_history_limit(document: Document, history_limit: usize) -> Self {
        Self {
            current: document,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            history_limit,
        }
    }

    /// Read-only ordered snapshot of section ids.
    pub fn order(&self) -> Vec<&SectionId> {
        self.current.order()
    }

    /// Borrow of the current snapshot.
    pub fn document(&self) -> &Document {
        &self.current
    }

    /// Owned handle to the current snapshot.
    pub fn snapshot(&self) -> Document {
        self.current.clone()
    }

    /// Moves `source_id` to the former index of `target_id`.
    pub(crate) fn reorder(
        &mut self,
        access: &EditAccess<'_>,
        source_id: &str,
        target_id: &str,
    ) -> StoreUpdate {
        let next = self.current.reorder(source_id, target_id);
        self.replace(access, next)
    }

    /// Replaces the content of one section verbatim.
    pub(crate) fn set_content(
        &mut self,
        access: &EditAccess<'_>,
        id: &str,
        content: impl Into<String>,
    ) -> StoreUpdate {
        let next = self.current.set_content(id, content);
        self.replace(access, next)
    }

    /// Publishes a snapshot computed from the current one.
    ///
    /// A snapshot that adds, drops or renames sections is refused.
    pub(crate) fn replace(&mut self, _access: &EditAccess<'_>, next: Document) -> StoreUpdate {
        if next.ptr_eq(&self.current) || next == self.current {
            return StoreUpdate::Unchanged;
        }
        if !same_membership(&self.current, &next) {
            warn!("event=store_replace module=store status=rejected reason=membership_changed");
            return StoreUpdate::Unchanged;
        }
        let previous = std::mem::replace(&mut self.current, next);
        self.push_undo(previous);
        self.redo_stack.clear();
        StoreUpdate::Applied
    }

    /// Restores the snapshot preceding the last applied update.
    pub(crate) fn undo(&mut self, _access: &EditAccess<'_>) -> StoreUpdate {
        let Some(previous) = self.undo_stack.pop_back() else {
            debug!("event=store_undo module=store status=skipped reason=empty_history");
            return StoreUpdate::Unchanged;
        };
        let current = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(current);
        StoreUpdate::Applied
    }

    /// Re-applies the last undone update.
    pub(crate) fn redo(&mut self, _access: &EditAccess<'_>) -> StoreUpdate {
        let Some(next) = self.redo_stack.pop() else {
            debug!("event=store_redo module=store status=skipped reason=empty_history");
            return StoreUpdate::Unchanged;
        };
        let current = std::mem::replace(&mut self.current, next);
        self.push_undo(current);
        StoreUpdate::Applied
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn push_undo(&mut self, document: Document) {
        if self.history_limit == 0 {
            return;
        }
        if self.undo_stack.len() == self.history_limit {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(document);
    }
}

fn same_membership(current: &Document, next: &Document) -> bool {
    if current.len() != next.len() {
        return false;
    }
    let ids: HashSet<&str> = current.sections().iter().map(|s| s.id.as_str()).collect();
    next.sections()
        .iter()
        .all(|section| ids.contains(section.id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::{SectionStore, StoreUpdate};
    use crate::mode::ModeController;
    use crate::model::document::Document;
    use crate::model::section::{Section, SectionKind};

    fn store(limit: usize) -> SectionStore {
        let sections = ["a", "b", "c"]
            .iter()
            .map(|id| Section::new(*id, *id, SectionKind::Other, "").unwrap())
            .collect();
        SectionStore::with_history_limit(Document::new(sections).unwrap(), limit)
    }

    fn ids(store: &SectionStore) -> Vec<String> {
        store.order().iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn earlier_snapshots_are_not_modified() {
        let mode = ModeController::default();
        let access = mode.edit_access().unwrap();
        let mut store = store(10);
        let before = store.snapshot();

        assert_eq!(store.reorder(&access, "c", "a"), StoreUpdate::Applied);
        assert_eq!(ids(&store), ["c", "a", "b"]);
        let before_ids: Vec<_> = before.order().iter().map(|id| id.to_string()).collect();
        assert_eq!(before_ids, ["a", "b", "c"]);
    }

    #[test]
    fn noop_does_not_touch_history() {
        let mode = ModeController::default();
        let access = mode.edit_access().unwrap();
        let mut store = store(10);

        assert_eq!(store.reorder(&access, "a", "a"), StoreUpdate::Unchanged);
        assert_eq!(store.set_content(&access, "missing", "x"), StoreUpdate::Unchanged);
        assert_eq!(store.set_content(&access, "a", ""), StoreUpdate::Unchanged);
        assert!(!store.can_undo());
    }

    #[test]
    fn undo_redo_round_trip_and_new_update_clears_redo() {
        let mode = ModeController::default();
        let access = mode.edit_access().unwrap();
        let mut store = store(10);

        store.reorder(&access, "a", "c");
        store.set_content(&access, "b", "edited");
        assert_eq!(store.undo(&access), StoreUpdate::Applied);
        assert_eq!(store.document().get("b").unwrap().content, "");
        assert_eq!(store.redo(&access), StoreUpdate::Applied);
        assert_eq!(store.document().get("b").unwrap().content, "edited");

        store.undo(&access);
        store.reorder(&access, "b", "c");
        assert!(!store.can_redo());
        assert_eq!(store.redo(&access), StoreUpdate::Unchanged);
    }

    #[test]
    fn replace_refuses_membership_changes() {
        let mode = ModeController::default();
        let access = mode.edit_access().unwrap();
        let mut store = store(10);

        assert_eq!(store.replace(&access, Document::empty()), StoreUpdate::Unchanged);
        assert_eq!(ids(&store), ["a", "b", "c"]);

        let swapped = Document::new(
            ["a", "b", "z"]
                .iter()
                .map(|id| Section::new(*id, *id, SectionKind::Other, "").unwrap())
                .collect(),
        )
        .unwrap();
        assert_eq!(store.replace(&access, swapped), StoreUpdate::Unchanged);
        assert_eq!(ids(&store), ["a", "b", "c"]);
        assert!(!store.can_undo());

        let permuted = store.document().reorder("c", "a");
        assert_eq!(store.replace(&access, permuted), StoreUpdate::Applied);
        assert_eq!(ids(&store), ["c", "a", "b"]);
    }

    #[test]
    fn history_is_bounded() {
        let mode = ModeController::default();
        let access = mode.edit_access().unwrap();
        let mut store = store(2);

        store.set_content(&access, "a", "1");
        store.set_content(&access, "a", "2");
        store.set_content(&access, "a", "3");
        assert_eq!(store.undo(&access), StoreUpdate::Applied);
        assert_eq!(store.undo(&access), StoreUpdate::Applied);
        assert_eq!(store.undo(&access), StoreUpdate::Unchanged);
        assert_eq!(store.document().get("a").unwrap().content, "1");
    }
}
