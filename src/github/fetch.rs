// src/github/fetch.rs
// =============================================================================
// Talks to the remote repository providers.
//
// Three lookups feed the browser:
// - repository metadata:  GET {api}/repos/{owner}/{name}
// - directory listing:    GET {api}/repos/{owner}/{name}/contents/{path}
// - raw file content:     GET {download_url}
//
// They sit behind the RepositoryProvider trait so the browsing session can be
// driven by an in-memory provider in tests.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use url::Url;

use crate::config::Settings;
use crate::error::{BrowseError, BrowseResult};
use crate::github::types::{
    ContentsResponse, DirectoryEntry, RepoResponse, RepositoryMetadata, RepositoryRef,
};

/// The three remote lookups the browser depends on.
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// Looks up description, counts and owner info for a repository.
    async fn fetch_metadata(&self, repo: &RepositoryRef) -> BrowseResult<RepositoryMetadata>;

    /// Lists a directory, in provider order. `""` is the repository root.
    async fn fetch_listing(
        &self,
        repo: &RepositoryRef,
        path: &str,
    ) -> BrowseResult<Vec<DirectoryEntry>>;

    /// Downloads the raw text behind a content locator.
    async fn fetch_content(&self, locator: &Url) -> BrowseResult<String>;
}

/// `RepositoryProvider` backed by the GitHub REST API.
#[derive(Clone)]
pub struct GitHubClient {
    api_base: Url,
    http: Client,
}

impl GitHubClient {
    pub fn new(settings: &Settings) -> BrowseResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(GitHubClient {
            api_base: settings.api_base.clone(),
            http,
        })
    }

    // Appends path segments to the API base, percent-encoding each one.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> BrowseResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| BrowseError::Fetch {
                status: None,
                detail: format!("API base URL cannot have paths: {}", self.api_base),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> BrowseResult<Response> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%url, status, "request failed");
            return Err(BrowseError::http(status, detail));
        }

        Ok(response)
    }
}

#[async_trait]
impl RepositoryProvider for GitHubClient {
    async fn fetch_metadata(&self, repo: &RepositoryRef) -> BrowseResult<RepositoryMetadata> {
        let url = self.endpoint(["repos", repo.owner.as_str(), repo.name.as_str()])?;
        let body: RepoResponse = self.get(url).await?.json().await?;
        Ok(body.into())
    }

    async fn fetch_listing(
        &self,
        repo: &RepositoryRef,
        path: &str,
    ) -> BrowseResult<Vec<DirectoryEntry>> {
        let segments = ["repos", repo.owner.as_str(), repo.name.as_str(), "contents"]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        let url = self.endpoint(segments)?;

        match self.get(url).await?.json::<ContentsResponse>().await? {
            ContentsResponse::Directory(items) => {
                Ok(items.into_iter().map(DirectoryEntry::from).collect())
            }
            ContentsResponse::File(item) => Err(BrowseError::NotADirectory { path: item.path }),
        }
    }

    async fn fetch_content(&self, locator: &Url) -> BrowseResult<String> {
        let bytes = self.get(locator.clone()).await?.bytes().await?;
        // Best-effort text decode; binary files come out mangled
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GitHubClient {
        let settings = Settings::new(&server.uri(), 5, Some("repo-browser-tests".to_string()))
            .unwrap();
        GitHubClient::new(&settings).unwrap()
    }

    fn repo() -> RepositoryRef {
        RepositoryRef {
            owner: "octo".to_string(),
            name: "hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_metadata() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octo/hello"))
            .and(header("user-agent", "repo-browser-tests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "full_name": "octo/hello",
                "description": null,
                "owner": { "avatar_url": "https://avatars.example/octo" },
                "language": "Rust",
                "stargazers_count": 42,
                "forks_count": 3,
                "html_url": "https://github.com/octo/hello",
                "default_branch": "main"
            })))
            .mount(&server)
            .await;

        let meta = client_for(&server).fetch_metadata(&repo()).await.unwrap();
        assert_eq!(meta.full_name, "octo/hello");
        assert_eq!(meta.description, None);
        assert_eq!(meta.star_count, 42);
        assert_eq!(meta.primary_language.as_deref(), Some("Rust"));
    }

    #[tokio::test]
    async fn test_fetch_metadata_not_found_carries_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octo/hello"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_metadata(&repo()).await.unwrap_err();
        assert_eq!(err, BrowseError::http(404, "Not Found"));
    }

    #[tokio::test]
    async fn test_fetch_listing_keeps_provider_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octo/hello/contents/src/bin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "name": "tool.rs",
                    "path": "src/bin/tool.rs",
                    "type": "file",
                    "size": 10,
                    "download_url": "https://raw.example/octo/hello/main/src/bin/tool.rs"
                },
                {
                    "name": "helpers",
                    "path": "src/bin/helpers",
                    "type": "dir",
                    "size": 0,
                    "download_url": null
                }
            ])))
            .mount(&server)
            .await;

        let entries = client_for(&server)
            .fetch_listing(&repo(), "src/bin")
            .await
            .unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["tool.rs", "helpers"]);
        assert!(entries[1].is_dir());
    }

    #[tokio::test]
    async fn test_fetch_root_listing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octo/hello/contents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let entries = client_for(&server).fetch_listing(&repo(), "").await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_listing_of_file_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octo/hello/contents/README.md"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "README.md",
                "path": "README.md",
                "type": "file",
                "size": 5,
                "download_url": "https://raw.example/README.md"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_listing(&repo(), "README.md")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            BrowseError::NotADirectory {
                path: "README.md".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_content() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/raw/README.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# hello\n"))
            .mount(&server)
            .await;

        let locator = Url::parse(&format!("{}/raw/README.md", server.uri())).unwrap();
        let content = client_for(&server).fetch_content(&locator).await.unwrap();
        assert_eq!(content, "# hello\n");
    }
}
