//! Ordered document snapshot.
//!
//! # Responsibility
//! - Hold the ordered section sequence that defines render/export order.
//! - Provide pure update functions that return new snapshots.
//!
//! # Invariants
//! - No two sections share an id.
//! - Updates never mutate an existing snapshot in place.
//! - Updates never change `id`, `kind`, `title` or sequence membership.
//! - Unknown ids and self-moves are silent no-ops that return the same
//!   snapshot handle.

use crate::model::section::{Section, SectionId};
use crate::reorder::move_item;
use log::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Immutable ordered sequence of sections.
///
/// Cloning is cheap: clones share the same backing allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    sections: Arc<[Section]>,
}

impl Document {
    /// Builds a document after validating identity invariants.
    ///
    /// # Errors
    /// - `DocumentError::DuplicateSectionId` when two sections share an id.
    pub fn new(sections: Vec<Section>) -> Result<Self, DocumentError> {
        let mut seen = HashSet::with_capacity(sections.len());
        for section in &sections {
            if !seen.insert(section.id.as_str()) {
                return Err(DocumentError::DuplicateSectionId(section.id.clone()));
            }
        }
        Ok(Self {
            sections: sections.into(),
        })
    }

    /// Empty document.
    pub fn empty() -> Self {
        Self {
            sections: Arc::from(Vec::<Section>::new()),
        }
    }

    /// Read-only ordered view of all sections.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Ordered section ids.
    pub fn order(&self) -> Vec<&SectionId> {
        self.sections.iter().map(|section| &section.id).collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Zero-based position of `id` in the current order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.id.as_str() == id)
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Returns whether both handles share the same snapshot allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sections, &other.sections)
    }

    /// Moves `source_id` to the former index of `target_id`.
    ///
    /// All other sections keep their relative order. Returns this snapshot
    /// unchanged when ids are equal or either id is absent.
    pub fn reorder(&self, source_id: &str, target_id: &str) -> Self {
        if source_id == target_id {
            return self.clone();
        }
        let (Some(from), Some(to)) = (self.position(source_id), self.position(target_id)) else {
            debug!("event=document_reorder module=model status=skipped reason=invalid_reference");
            return self.clone();
        };
        self.moved(from, to)
    }

    /// Replaces the content of one section.
    ///
    /// Content is stored verbatim. Returns this snapshot unchanged when the
    /// id is absent.
    pub fn set_content(&self, id: &str, content: impl Into<String>) -> Self {
        let Some(index) = self.position(id) else {
            debug!(
                "event=document_set_content module=model status=skipped reason=invalid_reference"
            );
            return self.clone();
        };
        let content = content.into();
        let sections = self
            .sections
            .iter()
            .enumerate()
            .map(|(current, section)| {
                if current == index {
                    section.with_content(content.as_str())
                } else {
                    section.clone()
                }
            })
            .collect::<Vec<_>>();
        Self {
            sections: sections.into(),
        }
    }

    /// Single-element list move from index `from` to index `to`.
    ///
    /// Out-of-range indices and `from == to` return this snapshot unchanged.
    pub(crate) fn moved(&self, from: usize, to: usize) -> Self {
        let len = self.sections.len();
        if from == to || from >= len || to >= len {
            return self.clone();
        }
        let mut sections = self.sections.to_vec();
        move_item(&mut sections, from, to);
        Self {
            sections: sections.into(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

/// Document construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Two sections share one id.
    DuplicateSectionId(SectionId),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateSectionId(id) => write!(f, "duplicate section id: {id}"),
        }
    }
}

impl Error for DocumentError {}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentError};
    use crate::model::section::{Section, SectionKind};

    fn doc(ids: &[&str]) -> Document {
        Document::new(
            ids.iter()
                .map(|id| Section::new(*id, id.to_uppercase(), SectionKind::Other, "").unwrap())
                .collect(),
        )
        .unwrap()
    }

    fn ids(document: &Document) -> Vec<&str> {
        document.order().into_iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let a = Section::new("a", "A", SectionKind::Header, "").unwrap();
        let err = Document::new(vec![a.clone(), a]).unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateSectionId(id) if id.as_str() == "a"));
    }

    #[test]
    fn reorder_moves_forward_and_backward() {
        let document = doc(&["a", "b", "c", "d"]);
        assert_eq!(ids(&document.reorder("a", "c")), ["b", "c", "a", "d"]);
        assert_eq!(ids(&document.reorder("d", "b")), ["a", "d", "b", "c"]);
        assert_eq!(ids(&document), ["a", "b", "c", "d"]);
    }

    #[test]
    fn reorder_noops_share_snapshot() {
        let document = doc(&["a", "b"]);
        assert!(document.reorder("a", "a").ptr_eq(&document));
        assert!(document.reorder("zz", "a").ptr_eq(&document));
        assert!(document.reorder("a", "zz").ptr_eq(&document));
    }

    #[test]
    fn moved_ignores_out_of_range_indices() {
        let document = doc(&["a", "b"]);
        assert!(document.moved(0, 5).ptr_eq(&document));
    }

    #[test]
    fn set_content_on_missing_id_is_noop() {
        let document = doc(&["a"]);
        assert!(document.set_content("missing", "x").ptr_eq(&document));
    }
}
