//! Wire types shared between the paste page script and the snippet server
//!
//! These types are used by both:
//! - the `paste-ui` page script (WASM)
//! - any server implementing the snippet-creation endpoint
//!
//! Serializable with serde for JSON over HTTP. The schema is flat on both
//! sides: `{text, lang, lineCount}` going out, `{address}` or `{errHTML}`
//! coming back.

use serde::{Deserialize, Serialize};

// ============================================================================
// Well-known constants
// ============================================================================

/// Default snippet-creation endpoint
pub const CREATE_SNIPPET_PATH: &str = "/paste";

/// Local-storage key holding the light theme flag
pub const THEME_STORAGE_KEY: &str = "light-theme";

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Snippet text is blank")]
    BlankText,
    #[error("No language selected")]
    MissingLanguage,
    #[error("Line count must be at least 1, got {0}")]
    NoLines(u32),
}

/// Number of lines in `text`, counted the way the line gutter labels them:
/// one per `'\n'`-separated segment, so the empty string is one line.
pub fn count_lines(text: &str) -> u32 {
    text.split('\n').count() as u32
}

// ============================================================================
// Language tags
// ============================================================================

/// Language tag picked in the editor's selector (e.g. `"python"`).
///
/// Always trimmed and non-empty. Unknown tags are the server's concern; it
/// falls back to plain text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn parse(raw: &str) -> Result<Self, SubmissionError> {
        let tag = raw.trim();
        if tag.is_empty() {
            return Err(SubmissionError::MissingLanguage);
        }
        Ok(Self(tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = SubmissionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Request / Response
// ============================================================================

/// Body of `POST /paste`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SnippetSubmission {
    pub text: String,
    pub lang: LanguageTag,
    pub line_count: u32,
}

impl SnippetSubmission {
    /// Build a submission from raw editor state, computing the line count.
    ///
    /// Whitespace-only text is rejected, same as an empty text area.
    pub fn new(text: impl Into<String>, lang: &str) -> Result<Self, SubmissionError> {
        let text = text.into();
        let submission = Self {
            line_count: count_lines(&text),
            lang: LanguageTag::parse(lang)?,
            text,
        };
        submission.validate()?;
        Ok(submission)
    }

    pub fn validate(&self) -> Result<(), SubmissionError> {
        if self.text.trim().is_empty() {
            return Err(SubmissionError::BlankText);
        }
        if self.line_count == 0 {
            return Err(SubmissionError::NoLines(self.line_count));
        }
        Ok(())
    }
}

/// Success body of `POST /paste`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedSnippet {
    pub address: String,
}

/// Failure body carried by a non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerFailure {
    #[serde(rename = "errHTML")]
    pub err_html: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines_matches_split_segments() {
        assert_eq!(count_lines(""), 1);
        assert_eq!(count_lines("hello"), 1);
        assert_eq!(count_lines("a\nb\nc"), 3);
        assert_eq!(count_lines("trailing\n"), 2);
        assert_eq!(count_lines("\n\n"), 3);
    }

    #[test]
    fn test_submission_serializes_flat_camel_case() {
        let submission = SnippetSubmission::new("hello", "python").unwrap();
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "hello", "lang": "python", "lineCount": 1})
        );
    }

    #[test]
    fn test_submission_rejects_blank_text() {
        assert_eq!(
            SnippetSubmission::new("", "go").unwrap_err(),
            SubmissionError::BlankText
        );
        assert_eq!(
            SnippetSubmission::new("  \n\t ", "go").unwrap_err(),
            SubmissionError::BlankText
        );
    }

    #[test]
    fn test_submission_rejects_missing_language() {
        assert_eq!(
            SnippetSubmission::new("fn main() {}", "   ").unwrap_err(),
            SubmissionError::MissingLanguage
        );
    }

    #[test]
    fn test_language_tag_is_trimmed() {
        let tag = LanguageTag::parse("  rust ").unwrap();
        assert_eq!(tag.as_str(), "rust");
        assert_eq!(tag.to_string(), "rust");
    }

    #[test]
    fn test_deserialized_submission_with_blank_lang_fails() {
        let err = serde_json::from_str::<SnippetSubmission>(
            r#"{"text": "x", "lang": "", "lineCount": 1}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_deserialized_zero_line_count_fails_validation() {
        let submission: SnippetSubmission =
            serde_json::from_str(r#"{"text": "x", "lang": "c", "lineCount": 0}"#).unwrap();
        assert_eq!(submission.validate(), Err(SubmissionError::NoLines(0)));
    }

    #[test]
    fn test_created_snippet_requires_address() {
        let created: CreatedSnippet = serde_json::from_str(r#"{"address": "/abc123"}"#).unwrap();
        assert_eq!(created.address, "/abc123");
        assert!(serde_json::from_str::<CreatedSnippet>(r#"{"addr": "/abc123"}"#).is_err());
    }

    #[test]
    fn test_server_failure_uses_err_html_key() {
        let failure: ServerFailure =
            serde_json::from_str(r#"{"errHTML": "<html><body>boom</body></html>"}"#).unwrap();
        assert_eq!(failure.err_html, "<html><body>boom</body></html>");
    }
}
