//! GitHub API demo
//!
//! Calls a few GitHub REST endpoints through jsonrest's `RestClient`.
//! Set `RUST_LOG=jsonrest=debug` to see every attempt.

// Demo-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]
#![allow(dead_code)]

use std::sync::Arc;

use jsonrest::prelude::*;
use jsonrest::{Backend, Outcome};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Data Types
// ============================================================================

/// A GitHub contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub contributions: u32,
}

/// A GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
}

/// Request to create a GitHub issue.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssue {
    pub title: String,
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// A GitHub issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u32,
    pub title: String,
    pub body: Option<String>,
    pub state: String,
}

/// Error body returned by GitHub for non-2xx answers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubError {
    pub message: String,
    pub documentation_url: Option<String>,
}

/// Filters for [`GitHubApi::list_issues`].
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub state: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

// ============================================================================
// API
// ============================================================================

const USER_AGENT: &str = "jsonrest-github-demo/0.1.0";
const ACCEPT: &str = "application/vnd.github+json";

/// GitHub API client.
#[derive(Clone)]
pub struct GitHubApi {
    client: RestClient,
    backend: Arc<dyn Backend>,
    token: Option<String>,
}

impl GitHubApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: RestClient::default().with_tracing(),
            backend: Arc::new(BaseUrl::new(base_url)),
            token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn config(&self, method: Method, path: String) -> Config {
        let config = Config::new(method, Arc::clone(&self.backend), path)
            .with_header(header::USER_AGENT.as_str(), USER_AGENT)
            .with_header(header::ACCEPT.as_str(), ACCEPT);

        match &self.token {
            Some(token) => {
                config.with_header(header::AUTHORIZATION.as_str(), format!("Bearer {token}"))
            }
            None => config,
        }
    }

    /// List contributors for a repository.
    pub async fn contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Contributor>, GitHubError> {
        let config = self.config(Method::Get, format!("/repos/{owner}/{repo}/contributors"));
        self.client.fetch(&config, Body::Empty).await
    }

    /// Get repository information.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository, GitHubError> {
        let config = self.config(Method::Get, format!("/repos/{owner}/{repo}"));
        self.client.fetch(&config, Body::Empty).await
    }

    /// List issues, optionally filtered.
    pub async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        filter: &IssueFilter,
    ) -> Result<Vec<Issue>, GitHubError> {
        let mut config = self.config(Method::Get, format!("/repos/{owner}/{repo}/issues"));
        if let Some(state) = &filter.state {
            config = config.with_param("state", state);
        }
        if let Some(per_page) = filter.per_page {
            config = config.with_param("per_page", per_page.to_string());
        }
        if let Some(page) = filter.page {
            config = config.with_param("page", page.to_string());
        }
        self.client.fetch(&config, Body::Empty).await
    }

    /// Create an issue.
    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        issue: &CreateIssue,
    ) -> Result<Issue, GitHubError> {
        let config = self.config(Method::Post, format!("/repos/{owner}/{repo}/issues"));
        self.client.fetch_json(&config, issue).await
    }

    /// Star a repository. Needs a token.
    pub async fn star(&self, owner: &str, repo: &str) -> Result<(), GitHubError> {
        let config = self.config(Method::Put, format!("/user/starred/{owner}/{repo}"));
        self.client.send(&config, Body::Empty).await
    }

    /// Check whether the authenticated user starred a repository.
    ///
    /// GitHub answers `204` when starred and `404` otherwise.
    pub async fn is_starred(&self, owner: &str, repo: &str) -> Result<bool, GitHubError> {
        let config = self.config(Method::Get, format!("/user/starred/{owner}/{repo}"));
        let outcome: Outcome<GitHubError> = self.client.attempt(&config, Body::Empty).await;
        if outcome.status() == Some(404) {
            return Ok(false);
        }
        outcome.into_result().map(|_| true)
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let github = match std::env::var("GITHUB_TOKEN") {
        Ok(token) => GitHubApi::new("https://api.github.com").with_token(token),
        Err(_) => GitHubApi::new("https://api.github.com"),
    };

    match github.get_repo("rust-lang", "rust").await {
        Ok(repo) => println!(
            "{} ({} stars, {} forks)",
            repo.full_name, repo.stargazers_count, repo.forks_count
        ),
        Err(err) => report(&err),
    }

    let filter = IssueFilter {
        state: Some("open".to_string()),
        per_page: Some(5),
        page: None,
    };
    match github.list_issues("rust-lang", "rust", &filter).await {
        Ok(issues) => {
            for issue in issues {
                println!("#{} {}", issue.number, issue.title);
            }
        }
        Err(err) => report(&err),
    }
}

fn report(err: &Error<GitHubError>) {
    match err {
        Error::Api { status, error } => {
            tracing::error!(status, message = %error.message, "GitHub refused the request");
        }
        other => tracing::error!(error = %other, "request failed"),
    }
}

// ============================================================================
// Tests using wiremock
// ============================================================================

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param},
    };

    use super::*;

    #[tokio::test]
    async fn test_contributors() {
        let mock_server = MockServer::start().await;

        let contributors = vec![
            Contributor {
                login: "user1".to_string(),
                contributions: 100,
            },
            Contributor {
                login: "user2".to_string(),
                contributions: 50,
            },
        ];

        Mock::given(method("GET"))
            .and(path("/repos/rust-lang/rust/contributors"))
            .and(header("Accept", ACCEPT))
            .and(header("User-Agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(&contributors))
            .mount(&mock_server)
            .await;

        let github = GitHubApi::new(mock_server.uri());

        let result = github
            .contributors("rust-lang", "rust")
            .await
            .expect("contributors");

        assert_eq!(result, contributors);
    }

    #[tokio::test]
    async fn test_get_repo_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/rust-lang/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com",
            })))
            .mount(&mock_server)
            .await;

        let github = GitHubApi::new(mock_server.uri());

        let result = github.get_repo("rust-lang", "nope").await;

        let_assert!(Err(Error::Api { status, error }) = result);
        check!(status == 404);
        check!(error.message == "Not Found");
    }

    #[tokio::test]
    async fn test_list_issues_with_query_params() {
        let mock_server = MockServer::start().await;

        let issues = vec![Issue {
            id: 1,
            number: 42,
            title: "Example issue".to_string(),
            body: Some("Issue body".to_string()),
            state: "open".to_string(),
        }];

        Mock::given(method("GET"))
            .and(path("/repos/rust-lang/rust/issues"))
            .and(query_param("state", "open"))
            .and(query_param("per_page", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&issues))
            .mount(&mock_server)
            .await;

        let github = GitHubApi::new(mock_server.uri());
        let filter = IssueFilter {
            state: Some("open".to_string()),
            per_page: Some(5),
            page: None,
        };

        let result = github
            .list_issues("rust-lang", "rust", &filter)
            .await
            .expect("issues");

        assert_eq!(result.first().expect("first issue").number, 42);
    }

    #[tokio::test]
    async fn test_create_issue_with_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/octo/demo/issues"))
            .and(header("Authorization", "Bearer secret"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({ "title": "Bug", "body": null })))
            .respond_with(ResponseTemplate::new(201).set_body_json(Issue {
                id: 7,
                number: 1,
                title: "Bug".to_string(),
                body: None,
                state: "open".to_string(),
            }))
            .expect(1)
            .mount(&mock_server)
            .await;

        let github = GitHubApi::new(mock_server.uri()).with_token("secret");
        let issue = CreateIssue {
            title: "Bug".to_string(),
            body: None,
            labels: Vec::new(),
        };

        let created = github
            .create_issue("octo", "demo", &issue)
            .await
            .expect("issue");

        assert_eq!(created.number, 1);
    }

    #[tokio::test]
    async fn test_is_starred() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/starred/rust-lang/rust"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/starred/rust-lang/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let github = GitHubApi::new(mock_server.uri()).with_token("secret");

        let_assert!(Ok(true) = github.is_starred("rust-lang", "rust").await);
        let_assert!(Ok(false) = github.is_starred("rust-lang", "nope").await);
    }
}
