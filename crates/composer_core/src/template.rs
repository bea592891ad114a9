//! Initial document templates.
//!
//! # Responsibility
//! - Provide the built-in resume template used at startup.
//! - Load alternative templates from JSON declarations.
//!
//! # Invariants
//! - Loaded templates pass the same identity validation as `Document::new`.
//! - Unknown section categories load as `SectionKind::Other`.

use crate::model::document::{Document, DocumentError};
use crate::model::section::{Section, SectionId, SectionKind};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const HEADER_CONTENT: &str = "<h1 class=\"text-2xl font-bold mb-2\">John Doe</h1><p class=\"text-lg text-gray-600\">Software Engineer</p><p class=\"text-sm text-gray-500\">john.doe@email.com | (555) 123-4567 | LinkedIn: /in/johndoe</p>";
const EXPERIENCE_CONTENT: &str = "<div class=\"mb-4\"><h3 class=\"font-semibold text-lg\">Senior Software Engineer</h3><p class=\"text-gray-600\">Tech Company Inc. | 2020 - Present</p><ul class=\"mt-2 list-disc list-inside text-gray-700\"><li>Led development of scalable web applications</li><li>Mentored junior developers and improved team productivity</li><li>Implemented CI/CD pipelines reducing deployment time by 50%</li></ul></div>";
const EDUCATION_CONTENT: &str = "<div class=\"mb-4\"><h3 class=\"font-semibold text-lg\">Bachelor of Science in Computer Science</h3><p class=\"text-gray-600\">University of Technology | 2016 - 2020</p><p class=\"text-gray-700 mt-2\">GPA: 3.8/4.0 | Dean's List | Relevant Coursework: Data Structures, Algorithms, Software Engineering</p></div>";
const SKILLS_CONTENT: &str = "<div class=\"grid grid-cols-2 gap-4\"><div><h4 class=\"font-semibold mb-2\">Programming Languages</h4><p class=\"text-gray-700\">JavaScript, TypeScript, Python, Java</p></div><div><h4 class=\"font-semibold mb-2\">Frameworks & Tools</h4><p class=\"text-gray-700\">React, Next.js, Node.js, Docker, AWS</p></div></div>";

/// Serialized template declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFile {
    pub sections: Vec<Section>,
}

/// Built-in four-section resume: header, experience, education, skills.
pub fn default_resume() -> Document {
    let sections = [
        ("header", "Header", SectionKind::Header, HEADER_CONTENT),
        ("experience", "Experience", SectionKind::Experience, EXPERIENCE_CONTENT),
        ("education", "Education", SectionKind::Education, EDUCATION_CONTENT),
        ("skills", "Skills", SectionKind::Skills, SKILLS_CONTENT),
    ]
    .into_iter()
    .map(|(id, title, kind, content)| Section {
        id: SectionId::new(id).expect("built-in section ids are not blank"),
        title: title.to_string(),
        kind,
        content: content.to_string(),
    })
    .collect();

    Document::new(sections).expect("built-in section ids are unique")
}

/// Loads a template from its JSON declaration.
///
/// # Errors
/// - `TemplateError::Parse` for malformed JSON or missing fields.
/// - `TemplateError::Document` when ids are blank or duplicated.
pub fn load_template_json(raw: &str) -> Result<Document, TemplateError> {
    let file: TemplateFile = serde_json::from_str(raw).map_err(TemplateError::Parse)?;
    Document::new(file.sections).map_err(TemplateError::Document)
}

/// Template loading errors.
#[derive(Debug)]
pub enum TemplateError {
    Parse(serde_json::Error),
    Document(DocumentError),
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid template json: {err}"),
            Self::Document(err) => write!(f, "invalid template document: {err}"),
        }
    }
}

impl Error for TemplateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Document(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{default_resume, load_template_json, TemplateError};
    use crate::model::document::DocumentError;
    use crate::model::section::SectionKind;

    #[test]
    fn default_resume_has_four_sections_in_order() {
        let document = default_resume();
        let order: Vec<_> = document.order().iter().map(|id| id.as_str()).collect();
        assert_eq!(order, ["header", "experience", "education", "skills"]);
        assert!(document.get("header").unwrap().content.contains("John Doe"));
    }

    #[test]
    fn default_skills_keep_literal_ampersand() {
        let resume = default_resume();
        let skills = &resume.get("skills").unwrap().content;
        assert!(skills.contains("Frameworks & Tools"));
        assert!(!skills.contains("&amp;"));
    }

    #[test]
    fn load_maps_unknown_type_to_other() {
        let document = load_template_json(
            r#"{"sections":[
                {"id":"summary","title":"Summary","type":"summary","content":"<p>Hi</p>"},
                {"id":"skills","title":"Skills","type":"skills","content":""}
            ]}"#,
        )
        .unwrap();
        assert_eq!(document.get("summary").unwrap().kind, SectionKind::Other);
        assert_eq!(document.get("skills").unwrap().kind, SectionKind::Skills);
    }

    #[test]
    fn load_rejects_duplicate_and_blank_ids() {
        let err = load_template_json(
            r#"{"sections":[
                {"id":"a","title":"A","type":"header","content":""},
                {"id":"a ","title":"B","type":"skills","content":""}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TemplateError::Document(DocumentError::DuplicateSectionId(ref id)) if id.as_str() == "a"
        ));

        let err = load_template_json(
            r#"{"sections":[{"id":"  ","title":"A","type":"header","content":""}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TemplateError::Parse(_)));
    }

    #[test]
    fn load_rejects_malformed_json() {
        assert!(matches!(
            load_template_json("{"),
            Err(TemplateError::Parse(_))
        ));
    }
}
