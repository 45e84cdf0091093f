use crate::error::ReadmeError;
use crate::result::ReadmeResult;
use std::fmt::{Display, Formatter, Result as FmtResult};

const HOST_MARKER: &str = "github.com";

/// Owner/name pair identifying a hosted repository. Both parts are non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositoryReference {
    owner: String,
    name: String,
}

impl RepositoryReference {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extracts the owner/name pair from a `https://github.com/{owner}/{repo}` style URL.
    pub fn parse(repo_url: &str) -> ReadmeResult<Self> {
        let repo_url = repo_url.trim();
        if !repo_url.contains(HOST_MARKER) {
            return Err(ReadmeError::InvalidUrl(format!(
                "\"{repo_url}\" is not a {HOST_MARKER} URL"
            )));
        }

        let Some((_, path)) = repo_url.split_once("github.com/") else {
            return Err(ReadmeError::InvalidUrl(format!(
                "\"{repo_url}\" has no repository path"
            )));
        };

        let mut segments = path.split('/');
        let (Some(owner), Some(name)) = (segments.next(), segments.next()) else {
            return Err(ReadmeError::InvalidUrl(format!(
                "\"{repo_url}\" must name both an owner and a repository"
            )));
        };

        let owner = owner.trim();
        let name = name.trim();
        let name = name.strip_suffix(".git").unwrap_or(name);

        if owner.is_empty() || name.is_empty() {
            return Err(ReadmeError::InvalidUrl(format!(
                "could not extract owner and repository name from \"{repo_url}\""
            )));
        }

        Ok(Self {
            owner: String::from(owner),
            name: String::from(name),
        })
    }
}

impl Display for RepositoryReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
