use crate::language_breakdown::LanguageBreakdown;

/// Everything gathered about one repository for one request.
#[derive(Clone, Debug)]
pub struct RepositoryMetadata {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub license: Option<String>,
    pub owner: String,
    pub html_url: String,
    pub created_at: String,
    pub updated_at: String,
    pub languages: Vec<String>,
    pub languages_breakdown: LanguageBreakdown,
    pub topics: Vec<String>,
    pub readme: String,
    pub contributors: Vec<String>,
    pub default_branch: String,
    pub project_structure: Vec<String>,
}

impl RepositoryMetadata {
    pub const NO_DESCRIPTION: &'static str = "No description provided";
    pub const NO_LICENSE: &'static str = "Not specified";

    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(Self::NO_DESCRIPTION)
    }

    pub fn license_or_default(&self) -> &str {
        self.license.as_deref().unwrap_or(Self::NO_LICENSE)
    }

    /// Largest language by bytes.
    pub fn primary_language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }
}
