use crate::error::ReadmeError;
use crate::http_client::build_client;
use crate::language_breakdown::LanguageBreakdown;
use crate::metadata::RepositoryMetadata;
use crate::object_model::{Contributor, LanguageBytes, Repo, Topics, Tree};
use crate::project_structure::summarize_structure;
use crate::repo_url::RepositoryReference;
use crate::result::ReadmeResult;
use anyhow::anyhow;
use futures_util::future::{join3, try_join3};
use log::{debug, warn};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{IntoUrl, Response, Url};
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use std::time::Duration;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const TOPICS_MEDIA_TYPE: &str = "application/vnd.github.mercy-preview+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";
const CONTRIBUTOR_LIMIT: usize = 10;
const FALLBACK_BRANCH: &str = "main";

pub struct GitHubClient {
    url: Url,
    token: Option<String>,
    client: ClientWithMiddleware,
}

impl GitHubClient {
    pub fn new<U>(url: U, token: Option<&str>, timeout: Duration) -> ReadmeResult<Self>
    where
        U: IntoUrl,
    {
        Ok(Self {
            url: url
                .into_url()
                .map_err(|e| ReadmeError::Other(anyhow!(e)))?,
            token: token.map(String::from),
            client: build_client(timeout)?,
        })
    }

    /// Gathers repository attributes, languages and topics (all required) plus
    /// README, contributors and the top-level file tree (best effort).
    pub async fn fetch_metadata(
        &self,
        reference: &RepositoryReference,
        include_tree: bool,
    ) -> ReadmeResult<RepositoryMetadata> {
        let (repo, language_bytes, topics) = try_join3(
            self.get_repo(reference),
            self.get_languages(reference),
            self.get_topics(reference),
        )
        .await?;

        let default_branch = repo
            .default_branch
            .clone()
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| String::from(FALLBACK_BRANCH));

        let (readme, contributors, project_structure) = join3(
            self.get_readme(reference),
            self.get_contributors(reference),
            async {
                if include_tree {
                    self.get_project_structure(reference, &default_branch).await
                } else {
                    Ok(Vec::new())
                }
            },
        )
        .await;

        Ok(RepositoryMetadata {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            license: repo.license.map(|l| l.name),
            owner: repo.owner.login,
            html_url: repo.html_url,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            languages: language_bytes.names(),
            languages_breakdown: LanguageBreakdown::from_bytes(&language_bytes),
            topics: topics.names,
            readme: readme.or_empty("README", reference),
            contributors: contributors.or_empty("contributors", reference),
            default_branch,
            project_structure: project_structure.or_empty("file tree", reference),
        })
    }

    async fn get_repo(&self, reference: &RepositoryReference) -> ReadmeResult<Repo> {
        self.get_json(self.repo_url(reference, &[])?, JSON_MEDIA_TYPE)
            .await
    }

    async fn get_languages(&self, reference: &RepositoryReference) -> ReadmeResult<LanguageBytes> {
        self.get_json(self.repo_url(reference, &["languages"])?, JSON_MEDIA_TYPE)
            .await
    }

    async fn get_topics(&self, reference: &RepositoryReference) -> ReadmeResult<Topics> {
        self.get_json(self.repo_url(reference, &["topics"])?, TOPICS_MEDIA_TYPE)
            .await
    }

    async fn get_readme(&self, reference: &RepositoryReference) -> ReadmeResult<String> {
        self.get(self.repo_url(reference, &["readme"])?, RAW_MEDIA_TYPE)
            .await?
            .text()
            .await
            .map_err(|e| ReadmeError::Other(anyhow!(e)))
    }

    async fn get_contributors(&self, reference: &RepositoryReference) -> ReadmeResult<Vec<String>> {
        let mut url = self.repo_url(reference, &["contributors"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &CONTRIBUTOR_LIMIT.to_string());

        Ok(self
            .get_json::<Vec<Contributor>>(url, JSON_MEDIA_TYPE)
            .await?
            .into_iter()
            .filter_map(|c| c.login.filter(|l| !l.is_empty()))
            .take(CONTRIBUTOR_LIMIT)
            .collect())
    }

    async fn get_project_structure(
        &self,
        reference: &RepositoryReference,
        branch: &str,
    ) -> ReadmeResult<Vec<String>> {
        let mut segments = vec!["git", "trees"];
        segments.extend(branch.split('/'));
        let mut url = self.repo_url(reference, &segments)?;
        url.query_pairs_mut().append_pair("recursive", "1");

        let tree = self.get_json::<Tree>(url, JSON_MEDIA_TYPE).await?;
        if tree.truncated {
            debug!("file tree for {reference} was truncated upstream");
        }
        Ok(summarize_structure(tree.tree.iter().map(|e| e.path.as_str())))
    }

    fn repo_url(&self, reference: &RepositoryReference, tail: &[&str]) -> ReadmeResult<Url> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| ReadmeError::Other(anyhow!("GitHub API URL {} cannot be a base", self.url)))?
            .pop_if_empty()
            .extend(["repos", reference.owner(), reference.name()])
            .extend(tail);
        Ok(url)
    }

    async fn get_json<T>(&self, url: Url, accept: &str) -> ReadmeResult<T>
    where
        T: DeserializeOwned,
    {
        self.get(url, accept)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ReadmeError::Other(anyhow!(e)))
    }

    async fn get(&self, url: Url, accept: &str) -> ReadmeResult<Response> {
        let mut request_builder = self
            .client
            .get(url)
            .header(USER_AGENT, "readme-generator")
            .header(ACCEPT, accept)
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            request_builder = request_builder.bearer_auth(token);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|e| ReadmeError::Other(anyhow!(e)))?;

        if let Some(e) = ReadmeError::from_upstream_status(response.status()) {
            return Err(e);
        }

        response
            .error_for_status()
            .map_err(|e| ReadmeError::Other(anyhow!(e)))
    }
}

/// Collapses a failed optional sub-fetch to its empty value.
trait OrEmpty<T> {
    fn or_empty(self, what: &str, reference: &RepositoryReference) -> T;
}

impl<T> OrEmpty<T> for ReadmeResult<T>
where
    T: Default,
{
    fn or_empty(self, what: &str, reference: &RepositoryReference) -> T {
        self.unwrap_or_else(|e| {
            warn!("could not fetch {what} for {reference}, continuing without it: {e}");
            T::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::GitHubClient;
    use crate::error::ReadmeError;
    use crate::repo_url::RepositoryReference;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reference() -> RepositoryReference {
        RepositoryReference::parse("https://github.com/octo/widget").unwrap()
    }

    fn client(server: &MockServer, token: Option<&str>) -> GitHubClient {
        GitHubClient::new(server.uri(), token, Duration::from_secs(5)).unwrap()
    }

    fn repo_body() -> serde_json::Value {
        json!({
            "name": "widget",
            "full_name": "octo/widget",
            "description": "Widgets for everyone",
            "stargazers_count": 42,
            "forks_count": 7,
            "license": { "key": "mit", "name": "MIT License" },
            "html_url": "https://github.com/octo/widget",
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2024-06-01T12:00:00Z",
            "default_branch": "trunk",
            "owner": { "login": "octo" }
        })
    }

    async fn mount_required(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/languages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"TypeScript": 300, "CSS": 100}"#, "application/json"),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/topics"))
            .and(header("accept", "application/vnd.github.mercy-preview+json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "names": ["ui", "widgets"] })),
            )
            .mount(server)
            .await;
    }

    async fn mount_optional(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/readme"))
            .and(header("accept", "application/vnd.github.v3.raw"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# widget\n"))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/contributors"))
            .and(query_param("per_page", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "login": "octo" },
                { "type": "Anonymous" },
                { "login": "hubot" }
            ])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/git/trees/trunk"))
            .and(query_param("recursive", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tree": [
                    { "path": "package.json", "type": "blob" },
                    { "path": "src", "type": "tree" },
                    { "path": "src/index.ts", "type": "blob" },
                    { "path": "README.md", "type": "blob" }
                ],
                "truncated": false
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn fetches_everything() {
        let server = MockServer::start().await;
        mount_required(&server).await;
        mount_optional(&server).await;

        let metadata = client(&server, None)
            .fetch_metadata(&reference(), true)
            .await
            .unwrap();

        assert_eq!(metadata.name, "widget");
        assert_eq!(metadata.full_name, "octo/widget");
        assert_eq!(metadata.stars, 42);
        assert_eq!(metadata.forks, 7);
        assert_eq!(metadata.license.as_deref(), Some("MIT License"));
        assert_eq!(metadata.owner, "octo");
        assert_eq!(metadata.languages, vec!["TypeScript", "CSS"]);
        assert_eq!(metadata.languages_breakdown.get("TypeScript"), Some(75));
        assert_eq!(metadata.languages_breakdown.get("CSS"), Some(25));
        assert_eq!(metadata.topics, vec!["ui", "widgets"]);
        assert_eq!(metadata.readme, "# widget\n");
        assert_eq!(metadata.contributors, vec!["octo", "hubot"]);
        assert_eq!(metadata.default_branch, "trunk");
        assert_eq!(
            metadata.project_structure,
            vec!["README.md", "package.json", "src", "src/"]
        );
    }

    #[tokio::test]
    async fn optional_failures_degrade_to_empty() {
        let server = MockServer::start().await;
        mount_required(&server).await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/contributors"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/readme"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let metadata = client(&server, None)
            .fetch_metadata(&reference(), true)
            .await
            .unwrap();

        assert!(metadata.readme.is_empty());
        assert!(metadata.contributors.is_empty());
        assert!(metadata.project_structure.is_empty());
        assert_eq!(metadata.name, "widget");
    }

    #[tokio::test]
    async fn skips_tree_when_not_wanted() {
        let server = MockServer::start().await;
        mount_required(&server).await;
        mount_optional(&server).await;

        let metadata = client(&server, None)
            .fetch_metadata(&reference(), false)
            .await
            .unwrap();

        assert!(metadata.project_structure.is_empty());
        let requests = server.received_requests().await.unwrap();
        assert!(requests
            .iter()
            .all(|r| !r.url.path().contains("/git/trees/")));
    }

    #[tokio::test]
    async fn missing_default_branch_falls_back_to_main() {
        let server = MockServer::start().await;
        let mut body = repo_body();
        body["default_branch"] = serde_json::Value::Null;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/topics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "names": [] })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/git/trees/main"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "tree": [{ "path": "lib/a.rs" }] })),
            )
            .mount(&server)
            .await;

        let metadata = client(&server, None)
            .fetch_metadata(&reference(), true)
            .await
            .unwrap();

        assert_eq!(metadata.default_branch, "main");
        assert_eq!(metadata.project_structure, vec!["lib/"]);
        assert!(metadata.languages.is_empty());
        assert!(metadata.languages_breakdown.is_empty());
    }

    #[tokio::test]
    async fn sends_bearer_token() {
        let server = MockServer::start().await;
        mount_required(&server).await;

        let _ = client(&server, Some("s3cret"))
            .fetch_metadata(&reference(), false)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(!requests.is_empty());
        for request in requests {
            assert_eq!(
                request.headers.get("authorization").unwrap(),
                "Bearer s3cret"
            );
            assert_eq!(request.headers.get("user-agent").unwrap(), "readme-generator");
        }
    }

    async fn required_failure(status: u16) -> ReadmeError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/languages"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/topics"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        client(&server, None)
            .fetch_metadata(&reference(), true)
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn maps_required_failures() {
        assert!(matches!(
            required_failure(404).await,
            ReadmeError::RepositoryNotFound
        ));
        assert!(matches!(required_failure(401).await, ReadmeError::Unauthorized));
        assert!(matches!(required_failure(403).await, ReadmeError::RateLimited));
        assert!(matches!(required_failure(429).await, ReadmeError::RateLimited));
        assert!(matches!(required_failure(502).await, ReadmeError::Other(_)));
    }

    #[tokio::test]
    async fn topics_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widget/topics"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client(&server, None)
            .fetch_metadata(&reference(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, ReadmeError::RateLimited));
    }
}
