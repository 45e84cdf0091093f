use crate::config::Config;
use crate::error::ReadmeError;
use crate::gemini_client::{GeminiClient, TextGenerator};
use crate::github_client::GitHubClient;
use crate::language_breakdown::LanguageBreakdown;
use crate::metadata::RepositoryMetadata;
use crate::prompt::{render_prompt, PromptData};
use crate::repo_url::RepositoryReference;
use crate::result::ReadmeResult;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Where a request is in its lifecycle. A failure in any stage ends the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    AwaitingInput,
    ParsingUrl,
    FetchingMetadata,
    BuildingPrompt,
    GeneratingText,
    Responding,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::AwaitingInput => "awaiting input",
            Self::ParsingUrl => "parsing URL",
            Self::FetchingMetadata => "fetching metadata",
            Self::BuildingPrompt => "building prompt",
            Self::GeneratingText => "generating text",
            Self::Responding => "responding",
        })
    }
}

/// Caller preferences applied to what the generator gets to see.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOptions {
    pub include_existing_readme: bool,
    pub limit_file_parsing: bool,
    pub include_contributors: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            include_existing_readme: true,
            limit_file_parsing: false,
            include_contributors: true,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub generated_readme: String,
    pub meta: ReadmeMeta,
}

/// What a client displays next to the generated README.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeMeta {
    pub name: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    pub license: String,
    pub topics: Vec<String>,
    pub last_updated: String,
    pub languages_breakdown: LanguageBreakdown,
    pub readme_existing: String,
    pub url: String,
    pub project_structure: Vec<String>,
    pub contributors: Vec<String>,
}

impl From<RepositoryMetadata> for ReadmeMeta {
    fn from(metadata: RepositoryMetadata) -> Self {
        Self {
            description: String::from(metadata.description_or_default()),
            language: String::from(metadata.primary_language().unwrap_or("Unknown")),
            license: String::from(metadata.license_or_default()),
            name: metadata.name,
            stars: metadata.stars,
            forks: metadata.forks,
            topics: metadata.topics,
            last_updated: metadata.updated_at,
            languages_breakdown: metadata.languages_breakdown,
            readme_existing: metadata.readme,
            url: metadata.html_url,
            project_structure: metadata.project_structure,
            contributors: metadata.contributors,
        }
    }
}

pub struct ReadmeService {
    github: GitHubClient,
    generator: Option<Box<dyn TextGenerator>>,
}

impl ReadmeService {
    pub fn new(github: GitHubClient, generator: Option<Box<dyn TextGenerator>>) -> Self {
        Self { github, generator }
    }

    pub fn from_config(config: &Config) -> ReadmeResult<Self> {
        let github = GitHubClient::new(
            config.github_api_url.as_str(),
            config.github_token.as_deref(),
            config.request_timeout,
        )?;

        let generator = match config.gemini_api_key.as_deref() {
            Some(key) if !key.is_empty() => Some(Box::new(GeminiClient::new(
                config.gemini_api_url.as_str(),
                key,
                &config.gemini_model,
                config.request_timeout,
            )?) as Box<dyn TextGenerator>),
            _ => None,
        };

        Ok(Self::new(github, generator))
    }

    pub async fn generate(
        &self,
        repo_url: Option<&str>,
        options: &GenerateOptions,
    ) -> ReadmeResult<ResponseEnvelope> {
        let mut stage = Stage::AwaitingInput;
        let result = self.run(&mut stage, repo_url, options).await;
        match &result {
            Err(e) if e.status().is_client_error() => warn!("request rejected while {stage}: {e}"),
            Err(e) => error!("request failed while {stage}: {e:?}"),
            Ok(_) => {}
        }
        result
    }

    async fn run(
        &self,
        stage: &mut Stage,
        repo_url: Option<&str>,
        options: &GenerateOptions,
    ) -> ReadmeResult<ResponseEnvelope> {
        let repo_url = repo_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ReadmeError::MissingUrl)?;
        let generator = self
            .generator
            .as_deref()
            .ok_or(ReadmeError::Configuration("Gemini API key"))?;
        info!("received request for {repo_url}");

        advance(stage, Stage::ParsingUrl);
        let reference = RepositoryReference::parse(repo_url)?;

        advance(stage, Stage::FetchingMetadata);
        let metadata = self
            .github
            .fetch_metadata(&reference, !options.limit_file_parsing)
            .await?;

        advance(stage, Stage::BuildingPrompt);
        let mut data = PromptData::new(&metadata);
        if !options.include_existing_readme {
            data.existing_readme = "";
        }
        if !options.include_contributors {
            data.contributors = &[];
        }
        let prompt = render_prompt(&data)?;

        advance(stage, Stage::GeneratingText);
        let generated_readme = generator.generate(&prompt).await?;

        advance(stage, Stage::Responding);
        info!(
            "generated {} bytes of README for {reference}",
            generated_readme.len()
        );
        Ok(ResponseEnvelope {
            generated_readme,
            meta: ReadmeMeta::from(metadata),
        })
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!("{stage} -> {next}");
    *stage = next;
}
