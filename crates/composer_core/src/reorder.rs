//! Drag gesture to list permutation.
//!
//! # Responsibility
//! - Translate a committed drag gesture into a deterministic move plan.
//! - Apply a plan as a single-element list move over a document snapshot.
//! - Map keyboard nudges onto the same gesture shape.
//!
//! # Invariants
//! - Only the final `(source, over)` pair at drop time matters; intermediate
//!   drag positions never reach this module.
//! - A move removes the source and reinserts it at the target index; the
//!   sections in between shift by one, they are never swapped pairwise.
//! - Applying a plan never creates, drops or duplicates a section id.

use crate::model::document::Document;
use crate::model::section::SectionId;
use serde::{Deserialize, Serialize};

/// Committed drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    /// Dragged section. `None` when the drag was cancelled before it began.
    pub source: Option<SectionId>,
    /// Section under the pointer at drop time. `None` when dropped outside.
    pub over: Option<SectionId>,
}

impl DragGesture {
    pub fn new(source: SectionId, over: Option<SectionId>) -> Self {
        Self {
            source: Some(source),
            over,
        }
    }
}

/// Keyboard reorder direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

/// Why a gesture resolved to no change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOpReason {
    /// Gesture carried no source section.
    Cancelled,
    /// Drop happened outside any section.
    DroppedOutside,
    /// Source was dropped onto itself.
    SameTarget,
    /// Gesture named an id absent from the current document.
    UnknownSection(SectionId),
}

/// Resolved reorder decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderPlan {
    /// Move `source` from index `from` to index `to`.
    Move {
        source: SectionId,
        from: usize,
        to: usize,
    },
    NoOp(NoOpReason),
}

impl ReorderPlan {
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }
}

/// Stateless gesture interpreter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReorderEngine;

impl ReorderEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolves a gesture against the current order.
    pub fn plan(&self, document: &Document, gesture: &DragGesture) -> ReorderPlan {
        let Some(source) = gesture.source.as_ref() else {
            return ReorderPlan::NoOp(NoOpReason::Cancelled);
        };
        let Some(over) = gesture.over.as_ref() else {
            return ReorderPlan::NoOp(NoOpReason::DroppedOutside);
        };
        if source == over {
            return ReorderPlan::NoOp(NoOpReason::SameTarget);
        }
        let Some(from) = document.position(source.as_str()) else {
            return ReorderPlan::NoOp(NoOpReason::UnknownSection(source.clone()));
        };
        let Some(to) = document.position(over.as_str()) else {
            return ReorderPlan::NoOp(NoOpReason::UnknownSection(over.clone()));
        };
        ReorderPlan::Move {
            source: source.clone(),
            from,
            to,
        }
    }

    /// Applies a plan, returning the same snapshot for `NoOp`.
    ///
    /// A plan computed against a different snapshot whose indices no longer
    /// point at `source` is treated as stale and ignored.
    pub fn apply(&self, document: &Document, plan: &ReorderPlan) -> Document {
        match plan {
            ReorderPlan::Move { source, from, to } => {
                let still_valid = document
                    .sections()
                    .get(*from)
                    .is_some_and(|section| &section.id == source);
                if still_valid {
                    document.moved(*from, *to)
                } else {
                    document.clone()
                }
            }
            ReorderPlan::NoOp(_) => document.clone(),
        }
    }

    /// Builds the gesture for moving `id` one slot in `direction`.
    ///
    /// At the list edges (or for unknown ids) `over` is `None`, which plans
    /// as a no-op.
    pub fn nudge(&self, document: &Document, id: &SectionId, direction: Direction) -> DragGesture {
        let over = document.position(id.as_str()).and_then(|index| {
            let neighbour = match direction {
                Direction::Up => index.checked_sub(1)?,
                Direction::Down => index + 1,
            };
            document
                .sections()
                .get(neighbour)
                .map(|section| section.id.clone())
        });
        DragGesture::new(id.clone(), over)
    }
}

/// Single-element move over any vector.
///
/// Returns `false` and leaves `items` untouched for out-of-range indices.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}
