use clap::{Parser, Subcommand};
use readme_lib::{
    Config, DEFAULT_ALLOWED_ORIGINS, DEFAULT_GEMINI_API_URL, DEFAULT_GEMINI_MODEL,
    DEFAULT_GITHUB_API_URL,
};
use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Parser)]
#[clap(about = "Generate a README for a GitHub repository")]
pub struct Args {
    #[clap(
        short = 't',
        long = "github-token",
        help = "GitHub REST API token",
        env = "GITHUB_TOKEN",
        hide_env_values = true
    )]
    pub github_token: Option<String>,

    #[clap(
        short = 'k',
        long = "gemini-api-key",
        help = "Gemini API key",
        env = "GEMINI_API_KEY",
        hide_env_values = true
    )]
    pub gemini_api_key: Option<String>,

    #[clap(
        long = "allowed-origins",
        help = "Origins allowed to call the HTTP API",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values_t = DEFAULT_ALLOWED_ORIGINS.map(String::from)
    )]
    pub allowed_origins: Vec<String>,

    #[clap(
        long = "github-api-url",
        help = "GitHub REST API base URL",
        env = "GITHUB_API_URL",
        default_value = DEFAULT_GITHUB_API_URL
    )]
    pub github_api_url: String,

    #[clap(
        long = "gemini-api-url",
        help = "Gemini API base URL",
        env = "GEMINI_API_URL",
        default_value = DEFAULT_GEMINI_API_URL
    )]
    pub gemini_api_url: String,

    #[clap(
        long = "gemini-model",
        help = "Gemini model",
        env = "GEMINI_MODEL",
        default_value = DEFAULT_GEMINI_MODEL
    )]
    pub gemini_model: String,

    #[clap(
        long = "timeout",
        help = "Outbound request timeout in seconds",
        env = "REQUEST_TIMEOUT_SECS",
        default_value = "30"
    )]
    pub request_timeout_secs: u64,

    #[clap(
        long = "frontend-url",
        help = "Where GET / redirects to",
        env = "FRONTEND_URL"
    )]
    pub frontend_url: Option<String>,

    #[clap(
        long = "bind-address",
        help = "Address to listen on",
        env = "BIND_ADDRESS",
        default_value = "0.0.0.0"
    )]
    pub bind_address: IpAddr,

    #[clap(
        short = 'p',
        long = "port",
        help = "Port to listen on",
        env = "PORT",
        default_value = "5000"
    )]
    pub port: u16,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(about = "Serve the HTTP API (default)")]
    Serve,

    #[clap(about = "Generate one README and print it")]
    Generate {
        #[clap(help = "Repository URL, e.g. https://github.com/owner/repo")]
        url: String,

        #[clap(long = "no-existing-readme", help = "Hide the current README from the generator")]
        no_existing_readme: bool,

        #[clap(long = "no-contributors", help = "Hide contributors from the generator")]
        no_contributors: bool,

        #[clap(long = "limit-file-parsing", help = "Skip the recursive file tree")]
        limit_file_parsing: bool,
    },
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            github_token: non_empty(&self.github_token),
            gemini_api_key: non_empty(&self.gemini_api_key),
            allowed_origins: self
                .allowed_origins
                .iter()
                .map(|o| String::from(o.trim()))
                .filter(|o| !o.is_empty())
                .collect(),
            github_api_url: self.github_api_url.clone(),
            gemini_api_url: self.gemini_api_url.clone(),
            gemini_model: self.gemini_model.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            frontend_url: non_empty(&self.frontend_url),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
