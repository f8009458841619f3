use url::Url;

/// A synthetic speaker profile exposed by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Provider-assigned voice id
    pub id: String,
    /// Display name of the voice
    pub name: String,
    /// Free-form description, empty when the provider has none
    pub description: String,
    /// Sample clip for the voice, if the provider offers one
    pub preview_url: Option<Url>,
}

impl Voice {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            preview_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_preview_url(mut self, preview_url: Url) -> Self {
        self.preview_url = Some(preview_url);
        self
    }

    /// Case-insensitive substring match against name and description.
    ///
    /// A blank query matches every voice.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_name_case_insensitive() {
        let voice = Voice::new("v1", "Anastasia");
        assert!(voice.matches("ana"));
        assert!(voice.matches("ANA"));
        assert!(!voice.matches("bob"));
    }

    #[test]
    fn test_matches_description() {
        let voice = Voice::new("v2", "Rachel").with_description("Calm Banana narrator");
        assert!(voice.matches("ana"));
        assert!(voice.matches("narrator"));
        assert!(!voice.matches("excited"));
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let voice = Voice::new("v3", "Adam");
        assert!(voice.matches(""));
        assert!(voice.matches("   "));
    }
}
