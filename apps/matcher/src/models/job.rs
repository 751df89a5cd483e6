use serde::{Deserialize, Serialize};

/// A job posting as supplied by the caller: raw description plus whatever structured
/// metadata the source already knows.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobPosting {
    pub description: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Pre-known requirement; overrides whatever the description states.
    #[serde(default)]
    pub years_required: Option<u32>,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
}

impl JobPosting {
    pub fn from_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Title and description joined, so seniority words in the title are seen by the
    /// extractor.
    pub fn full_text(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => format!("{title}\n{}", self.description),
            _ => self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_prepends_title() {
        let posting = JobPosting {
            title: Some("Senior Engineer".to_string()),
            ..JobPosting::from_description("Build things.")
        };
        assert_eq!(posting.full_text(), "Senior Engineer\nBuild things.");
    }

    #[test]
    fn test_full_text_without_title_is_description() {
        let posting = JobPosting::from_description("Build things.");
        assert_eq!(posting.full_text(), "Build things.");
    }

    #[test]
    fn test_posting_deserializes_minimal() {
        let posting: JobPosting =
            serde_json::from_str(r#"{"description": "Python required", "location": "Remote"}"#)
                .unwrap();
        assert_eq!(posting.location.as_deref(), Some("Remote"));
        assert!(posting.years_required.is_none());
    }
}
