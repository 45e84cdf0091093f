use std::time::Duration;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com/";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
];

/// Process-wide settings, built once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub github_token: Option<String>,
    pub gemini_api_key: Option<String>,
    pub allowed_origins: Vec<String>,
    pub github_api_url: String,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub request_timeout: Duration,
    pub frontend_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            gemini_api_key: None,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| String::from(*s))
                .collect(),
            github_api_url: String::from(DEFAULT_GITHUB_API_URL),
            gemini_api_url: String::from(DEFAULT_GEMINI_API_URL),
            gemini_model: String::from(DEFAULT_GEMINI_MODEL),
            request_timeout: Duration::from_secs(30),
            frontend_url: None,
        }
    }
}
