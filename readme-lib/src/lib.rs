mod config;
mod error;
mod gemini_client;
mod github_client;
mod http_client;
mod language_breakdown;
mod logging_middleware;
mod metadata;
mod object_model;
mod pipeline;
mod project_structure;
mod prompt;
mod repo_url;
mod result;
mod server;

pub use self::config::{
    Config, DEFAULT_ALLOWED_ORIGINS, DEFAULT_GEMINI_API_URL, DEFAULT_GEMINI_MODEL,
    DEFAULT_GITHUB_API_URL,
};
pub use self::error::ReadmeError;
pub use self::gemini_client::{GeminiClient, TextGenerator};
pub use self::github_client::GitHubClient;
pub use self::language_breakdown::LanguageBreakdown;
pub use self::logging_middleware::LoggingMiddleware;
pub use self::metadata::RepositoryMetadata;
pub use self::object_model::LanguageBytes;
pub use self::pipeline::{GenerateOptions, ReadmeMeta, ReadmeService, ResponseEnvelope, Stage};
pub use self::project_structure::summarize_structure;
pub use self::prompt::{build_prompt, render_prompt, PromptData};
pub use self::repo_url::RepositoryReference;
pub use self::result::ReadmeResult;
pub use self::server::{router, GenerateRequest};
