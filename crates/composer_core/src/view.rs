//! Mode-aware render projection of sections.
//!
//! # Responsibility
//! - Project `(Section, Mode)` into one renderable view description.
//! - Map section kinds to icon/accent styling.
//! - Serialize the whole document view into the markup snapshot handed to
//!   export.
//!
//! # Invariants
//! - One projection path serves both modes; mode is an explicit parameter.
//! - Edit views are draggable over their whole outer region and expose a
//!   commit path; Preview views expose neither.
//! - `KindStyle::for_kind` is total and never fails.
//! - Section content is inserted into markup verbatim; only core-owned text
//!   (ids, titles, hints) is escaped.

use crate::event::ComposerEvent;
use crate::export::RenderSnapshot;
use crate::mode::Mode;
use crate::model::document::Document;
use crate::model::section::{Section, SectionId, SectionKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write as _;

static MARKUP_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const DRAG_HINT: &str = "Drag to reorder";

const EDIT_HINTS: &[&str] = &[
    "Click on any section content to edit it inline",
    "Drag sections by their headers to reorder them",
    "Use Preview mode to see the clean final result",
    "Download as PDF when you're satisfied with your resume",
];

/// Accent color for one section kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accent {
    Blue,
    Green,
    Purple,
    Orange,
    Gray,
}

impl Accent {
    /// CSS class applied to the section border.
    pub fn border_class(self) -> &'static str {
        match self {
            Self::Blue => "border-blue-500",
            Self::Green => "border-green-500",
            Self::Purple => "border-purple-500",
            Self::Orange => "border-orange-500",
            Self::Gray => "border-gray-400",
        }
    }
}

/// Visual category derived from `SectionKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindStyle {
    pub icon: &'static str,
    pub accent: Accent,
}

impl KindStyle {
    /// Generic style for unrecognized kinds.
    pub const FALLBACK: Self = Self {
        icon: "📄",
        accent: Accent::Gray,
    };

    pub fn for_kind(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Header => Self {
                icon: "👤",
                accent: Accent::Blue,
            },
            SectionKind::Experience => Self {
                icon: "💼",
                accent: Accent::Green,
            },
            SectionKind::Education => Self {
                icon: "🎓",
                accent: Accent::Purple,
            },
            SectionKind::Skills => Self {
                icon: "🛠️",
                accent: Accent::Orange,
            },
            SectionKind::Other => Self::FALLBACK,
        }
    }
}

/// Focusable content region available only in Edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableRegion {
    section_id: SectionId,
    content: String,
}

impl EditableRegion {
    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }

    /// Markup shown when the region gains focus.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Builds the commit event emitted when the region loses focus.
    pub fn commit(&self, new_content: impl Into<String>) -> ComposerEvent {
        ComposerEvent::ContentCommitted {
            section_id: self.section_id.clone(),
            content: new_content.into(),
        }
    }
}

/// Content presentation of one section view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    Editable(EditableRegion),
    Static(String),
}

impl ViewBody {
    pub fn content(&self) -> &str {
        match self {
            Self::Editable(region) => region.content(),
            Self::Static(content) => content,
        }
    }

    pub fn editable(&self) -> Option<&EditableRegion> {
        match self {
            Self::Editable(region) => Some(region),
            Self::Static(_) => None,
        }
    }
}

/// Render description for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub id: SectionId,
    pub kind: SectionKind,
    pub title: String,
    pub style: KindStyle,
    /// Whole outer region accepts pointer-down as a drag start.
    pub draggable: bool,
    pub drag_hint: Option<&'static str>,
    pub body: ViewBody,
}

impl SectionView {
    pub fn project(section: &Section, mode: Mode) -> Self {
        let editing = mode.is_edit();
        let body = if editing {
            ViewBody::Editable(EditableRegion {
                section_id: section.id.clone(),
                content: section.content.clone(),
            })
        } else {
            ViewBody::Static(section.content.clone())
        };
        Self {
            id: section.id.clone(),
            kind: section.kind,
            title: section.title.clone(),
            style: KindStyle::for_kind(section.kind),
            draggable: editing,
            drag_hint: editing.then_some(DRAG_HINT),
            body,
        }
    }

    /// Plain-text summary of the content for listings and accessible labels.
    pub fn summary(&self, max_chars: usize) -> String {
        let text = plain_text(self.body.content());
        if text.chars().count() <= max_chars {
            return text;
        }
        let mut truncated = text.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    }

    fn write_html(&self, out: &mut String) {
        let draggable = if self.draggable { " draggable=\"true\"" } else { "" };
        let _ = write!(
            out,
            "<section data-section-id=\"{}\" data-kind=\"{}\" class=\"section {}\"{}>",
            escape_html(self.id.as_str()),
            self.kind.as_str(),
            self.style.accent.border_class(),
            draggable,
        );
        let _ = write!(
            out,
            "<h2><span class=\"section-icon\">{}</span>{}</h2>",
            self.style.icon,
            escape_html(&self.title),
        );
        if let Some(hint) = self.drag_hint {
            let _ = write!(out, "<span class=\"drag-hint\">{}</span>", escape_html(hint));
        }
        let editable = if self.body.editable().is_some() {
            " contenteditable=\"true\""
        } else {
            ""
        };
        let _ = write!(
            out,
            "<div class=\"section-content\"{}>{}</div></section>",
            editable,
            self.body.content(),
        );
    }
}

/// Render description for the whole document in one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    pub mode: Mode,
    pub sections: Vec<SectionView>,
    /// Usage hints, shown only while editing.
    pub hints: Vec<&'static str>,
}

impl DocumentView {
    pub fn project(document: &Document, mode: Mode) -> Self {
        let sections = document
            .sections()
            .iter()
            .map(|section| SectionView::project(section, mode))
            .collect();
        let hints = if mode.is_edit() {
            EDIT_HINTS.to_vec()
        } else {
            Vec::new()
        };
        Self {
            mode,
            sections,
            hints,
        }
    }

    /// Serializes the view into one markup fragment.
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<div id=\"resume-content\" data-mode=\"{}\">",
            self.mode.as_str()
        );
        for section in &self.sections {
            section.write_html(&mut out);
        }
        if !self.hints.is_empty() {
            out.push_str("<aside class=\"usage-hints\"><ul>");
            for hint in &self.hints {
                let _ = write!(out, "<li>{}</li>", escape_html(hint));
            }
            out.push_str("</ul></aside>");
        }
        out.push_str("</div>");
        out
    }

    /// Captures the current render as an immutable export input.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::new(
            self.render_html(),
            self.mode,
            self.sections.iter().map(|section| section.id.clone()).collect(),
        )
    }
}

/// Strips markup tags and collapses whitespace.
///
/// Common character entities are decoded after tag removal.
pub fn plain_text(content: &str) -> String {
    let without_tags = MARKUP_TAG_RE.replace_all(content, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
