use crate::error::ReadmeError;
use crate::http_client::build_client;
use crate::result::ReadmeResult;
use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{IntoUrl, Url};
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A service that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> ReadmeResult<String>;
}

pub struct GeminiClient {
    url: Url,
    api_key: String,
    model: String,
    client: ClientWithMiddleware,
}

impl GeminiClient {
    pub fn new<U>(url: U, api_key: &str, model: &str, timeout: Duration) -> ReadmeResult<Self>
    where
        U: IntoUrl,
    {
        Ok(Self {
            url: url
                .into_url()
                .map_err(|e| ReadmeError::Other(anyhow!(e)))?,
            api_key: String::from(api_key),
            model: String::from(model),
            client: build_client(timeout)?,
        })
    }

    fn generate_content_url(&self) -> ReadmeResult<Url> {
        let method = format!("{}:generateContent", self.model);
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| ReadmeError::Other(anyhow!("Gemini API URL {} cannot be a base", self.url)))?
            .pop_if_empty()
            .extend(["v1beta", "models", method.as_str()]);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> ReadmeResult<String> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        let response = self
            .client
            .post(self.generate_content_url()?)
            .json(&request)
            .send()
            .await
            .map_err(generation_failed)?
            .error_for_status()
            .map_err(|e| generation_failed(e.into()))?
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| generation_failed(e.into()))?;

        response
            .first_text()
            .ok_or_else(|| {
                ReadmeError::GenerationFailed(String::from("Gemini API returned no content"))
            })
    }
}

/// The request URL carries the API key, so it is dropped from upstream errors.
fn generation_failed(e: reqwest_middleware::Error) -> ReadmeError {
    match e {
        reqwest_middleware::Error::Reqwest(e) => {
            ReadmeError::GenerationFailed(e.without_url().to_string())
        }
        e => ReadmeError::GenerationFailed(e.to_string()),
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(rename = "candidates", default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(rename = "content")]
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(rename = "parts", default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(rename = "text")]
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }
}
