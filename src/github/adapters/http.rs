//! reqwest-based GitHub REST API gateway.

use crate::config::GitHubSettings;
use crate::github::ports::{GitHubGateway, GitHubGatewayError, GitHubGatewayResult};
use crate::project::domain::GitHubRepoSummary;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;

const USER_AGENT: &str = "projects-api";
const PER_PAGE: u32 = 100;

/// GitHub REST API client.
///
/// Sends `Accept: application/vnd.github+json`, an optional bearer token for
/// the higher authenticated rate limit, and a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpGitHubGateway {
    client: reqwest::Client,
    api_url: String,
}

impl HttpGitHubGateway {
    /// Builds a gateway from upstream settings.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] when the underlying client cannot be
    /// constructed.
    pub fn new(settings: &GitHubSettings) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = &settings.token {
            if let Ok(mut value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl GitHubGateway for HttpGitHubGateway {
    async fn recent_repositories(
        &self,
        username: &str,
    ) -> GitHubGatewayResult<Vec<GitHubRepoSummary>> {
        let url = format!("{}/users/{username}/repos", self.api_url);
        let response = self
            .client
            .get(&url)
            .query(&[("per_page", PER_PAGE.to_string()), ("sort", "updated".to_owned())])
            .send()
            .await
            .map_err(GitHubGatewayError::transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GitHubGatewayError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<GitHubRepoSummary>>()
            .await
            .map_err(GitHubGatewayError::transport)
    }
}
