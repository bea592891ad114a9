//! Section domain model.
//!
//! # Responsibility
//! - Define the atomic content unit arranged by the composer.
//! - Provide the closed category set used for presentation lookups.
//!
//! # Invariants
//! - `id` is non-blank and never changes for the section lifetime.
//! - `title` and `kind` are fixed at creation; only `content` is replaced.
//! - `content` is opaque markup and is stored verbatim.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identity key for one section inside a document.
///
/// Deserialization goes through `SectionId::new`, so ids read from templates
/// or UI events are trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionId(String);

impl SectionId {
    /// Creates an id after trimming surrounding whitespace.
    ///
    /// # Errors
    /// - Returns `SectionValidationError::BlankId` when the trimmed value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, SectionValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SectionValidationError::BlankId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SectionId {
    type Error = SectionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SectionId> for String {
    fn from(value: SectionId) -> Self {
        value.0
    }
}

impl Display for SectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Presentation category of a section.
///
/// Purely presentational: kind never affects editing or reorder rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Name and contact block.
    Header,
    /// Work history.
    Experience,
    /// Degrees and coursework.
    Education,
    /// Skill listing.
    Skills,
    /// Unrecognized category from a loaded template.
    ///
    /// Rendered with the generic fallback style instead of failing.
    #[serde(other)]
    Other,
}

impl SectionKind {
    /// Stable string id used in template declarations.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Other => "other",
        }
    }
}

/// Atomic, independently orderable block of document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    /// Serialized as `type` to match template schema naming.
    #[serde(rename = "type")]
    pub kind: SectionKind,
    /// Opaque formatted text. May contain markup.
    pub content: String,
}

impl Section {
    /// Creates a section from raw parts.
    ///
    /// # Errors
    /// - Returns `SectionValidationError::BlankId` for a blank id.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: SectionKind,
        content: impl Into<String>,
    ) -> Result<Self, SectionValidationError> {
        Ok(Self {
            id: SectionId::new(id)?,
            title: title.into(),
            kind,
            content: content.into(),
        })
    }

    /// Returns a copy of this section with `content` replaced.
    ///
    /// Identity, title and kind are carried over unchanged.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            kind: self.kind,
            content: content.into(),
        }
    }
}

/// Section construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionValidationError {
    /// Section id is empty after trim.
    BlankId,
}

impl Display for SectionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "section id must not be blank"),
        }
    }
}

impl Error for SectionValidationError {}
