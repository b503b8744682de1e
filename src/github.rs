//! GitHub GraphQL client for per-repository language statistics, with
//! caching and a circuit breaker.

use std::env;
use std::future::Future;
use std::time::Duration;

use failsafe::{backoff, failure_policy, StateMachine};
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::errors::GitHubError;
use crate::stats::{LanguageEdge, Repository};

/// GitHub GraphQL endpoint.
const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Query for a user's non-fork, owner-affiliated repositories with their
/// top languages by size.
const TOP_LANGUAGES_QUERY: &str = r#"
query userInfo($login: String!) {
  user(login: $login) {
    repositories(ownerAffiliations: OWNER, isFork: false, first: 100) {
      nodes {
        name
        languages(first: 10, orderBy: { field: SIZE, direction: DESC }) {
          edges {
            size
            node {
              color
              name
            }
          }
        }
      }
    }
  }
}
"#;

/// Cache entry for tracking successful and failed requests.
#[derive(Clone, Debug)]
pub enum CacheEntry {
    /// Successfully fetched language data (cached for 30 minutes)
    Valid { data: Vec<Repository> },
    /// Failed request with remaining retry budget
    Invalid { error: GitHubError, remaining: u8 },
    /// Permanently failed request with original error preserved
    InvalidExhausted { error: GitHubError },
}

type Breaker = StateMachine<failure_policy::ConsecutiveFailures<backoff::FullJittered>, ()>;

/// The fetch seam consumed by the response pipeline.
///
/// Abstracting the collaborator behind a trait keeps the pipeline testable
/// with fetchers that count or script their invocations.
pub trait FetchStats {
    /// Fetches the per-repository language breakdown for a user.
    fn fetch_top_languages(
        &self,
        username: &str,
    ) -> impl Future<Output = std::result::Result<Vec<Repository>, GitHubError>> + Send;
}

/// GitHub API client with per-username caching and failure tracking.
pub struct GitHubClient {
    http: Client,
    token: Option<String>,
    /// Per-username cache of fetched language data
    pub cache: Cache<String, CacheEntry>,
    breaker: Breaker,
    retry_attempts: u8,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubClient {
    /// Creates a client resolving the token from `GITHUB_TOKEN`.
    pub fn new() -> Self {
        Self::with_token(env::var("GITHUB_TOKEN").ok())
    }

    /// Creates a client with an explicit token (still falling back to the
    /// environment when `None`).
    pub fn with_token(token: Option<String>) -> Self {
        let backoff = backoff::full_jittered(Duration::from_secs(10), Duration::from_secs(60));
        // Open after 5 consecutive qualifying failures
        let policy = failure_policy::consecutive_failures(5, backoff);

        Self {
            http: Client::builder()
                .user_agent(concat!("glot/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to create HTTP client"),
            token: token.or_else(|| env::var("GITHUB_TOKEN").ok()),
            cache: Cache::builder()
                .time_to_live(Duration::from_secs(30 * 60))
                .build(),
            breaker: failsafe::Config::new().failure_policy(policy).build(),
            retry_attempts: 3,
        }
    }

    /// The circuit breaker guarding GraphQL calls.
    pub fn circuit_breaker(&self) -> &Breaker {
        &self.breaker
    }

    /// Whether the breaker currently rejects calls.
    pub fn disabled(&self) -> bool {
        !self.breaker.is_call_permitted()
    }

    /// Whether an error should count against the circuit breaker.
    ///
    /// Upstream-health failures (network, rate limit, 5xx) qualify;
    /// per-request failures like an unknown user do not.
    pub fn should_trigger_circuit_breaker(error: &GitHubError) -> bool {
        match error {
            GitHubError::NetworkError | GitHubError::RateLimited => true,
            GitHubError::ApiError(code) => *code >= 500,
            _ => false,
        }
    }

    /// Fetches a user's language statistics with caching.
    ///
    /// # Caching Strategy
    /// - `Valid` entries: returned immediately (30 min TTL)
    /// - `InvalidExhausted` entries: original error returned immediately
    /// - `Invalid` entries with budget left: retry the API call
    /// - Unknown users: immediately cached as `InvalidExhausted`
    /// - Other errors: retried until the budget runs out
    #[instrument(skip(self))]
    pub async fn get_top_languages(
        &self,
        username: &str,
    ) -> std::result::Result<Vec<Repository>, GitHubError> {
        if let Some(entry) = self.cache.get(username).await {
            match entry {
                CacheEntry::Valid { data } => {
                    debug!("Cache hit for {}", username);
                    return Ok(data);
                }
                CacheEntry::InvalidExhausted { error } => {
                    info!("Cache hit for invalid user {} (retries exhausted)", username);
                    return Err(error);
                }
                // Invalid entry with budget left: continue to API call
                CacheEntry::Invalid { .. } => {}
            }
        }

        if self.disabled() {
            return Err(GitHubError::Disabled);
        }

        info!("Cache miss for {}", username);

        match self.request_top_languages(username).await {
            Ok(data) => {
                self.breaker.on_success();
                self.cache
                    .insert(username.to_string(), CacheEntry::Valid { data: data.clone() })
                    .await;
                Ok(data)
            }
            Err(error) => {
                if Self::should_trigger_circuit_breaker(&error) {
                    self.breaker.on_error();
                }
                self.record_failure(username, error.clone()).await;
                Err(error)
            }
        }
    }

    /// Performs the GraphQL request and decodes the response.
    async fn request_top_languages(
        &self,
        username: &str,
    ) -> std::result::Result<Vec<Repository>, GitHubError> {
        let mut request = self.http.post(GITHUB_GRAPHQL_URL).json(&json!({
            "query": TOP_LANGUAGES_QUERY,
            "variables": { "login": username },
        }));

        if let Some(token) = self.token.as_deref() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|_| GitHubError::NetworkError)?;
        let status = response.status();

        if !status.is_success() {
            return Err(match status.as_u16() {
                401 => GitHubError::AuthError("GitHub rejected the API token".to_string()),
                403 | 429 => GitHubError::RateLimited,
                code => GitHubError::ApiError(code),
            });
        }

        let body = response.text().await.map_err(|_| GitHubError::NetworkError)?;
        let data = parse_stats_response(&body)?;
        debug!("Fetched language stats for {}", username);
        Ok(data)
    }

    /// Books a failure into the cache, counting down the retry budget.
    async fn record_failure(&self, username: &str, error: GitHubError) {
        // Unknown users never resolve on retry
        if matches!(error, GitHubError::UserNotFound(_)) {
            info!("User not found: {} (immediately exhausted)", username);
            self.cache
                .insert(username.to_string(), CacheEntry::InvalidExhausted { error })
                .await;
            return;
        }

        let remaining = match self.cache.get(username).await {
            Some(CacheEntry::Invalid { remaining, .. }) => remaining,
            _ => self.retry_attempts,
        };

        let entry = if remaining <= 1 {
            info!("Retries exhausted for {}", username);
            CacheEntry::InvalidExhausted { error }
        } else {
            info!(
                "Failed to fetch language stats for {}, {} attempts remaining",
                username,
                remaining - 1
            );
            CacheEntry::Invalid {
                error,
                remaining: remaining - 1,
            }
        };

        self.cache.insert(username.to_string(), entry).await;
    }
}

impl FetchStats for GitHubClient {
    async fn fetch_top_languages(
        &self,
        username: &str,
    ) -> std::result::Result<Vec<Repository>, GitHubError> {
        self.get_top_languages(username).await
    }
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: String,
}

#[derive(Deserialize)]
struct GraphQlData {
    user: Option<UserNode>,
}

#[derive(Deserialize)]
struct UserNode {
    repositories: RepositoryConnection,
}

#[derive(Deserialize)]
struct RepositoryConnection {
    nodes: Vec<RepositoryNode>,
}

#[derive(Deserialize)]
struct RepositoryNode {
    name: String,
    languages: LanguageConnection,
}

#[derive(Deserialize)]
struct LanguageConnection {
    edges: Vec<EdgeNode>,
}

#[derive(Deserialize)]
struct EdgeNode {
    size: u64,
    node: LanguageNode,
}

#[derive(Deserialize)]
struct LanguageNode {
    color: Option<String>,
    name: String,
}

/// Decodes a GraphQL response body into repositories.
///
/// GraphQL transports errors in-band: a `NOT_FOUND` error type maps to
/// [`GitHubError::UserNotFound`] with the upstream message preserved.
pub fn parse_stats_response(body: &str) -> std::result::Result<Vec<Repository>, GitHubError> {
    let response: GraphQlResponse =
        serde_json::from_str(body).map_err(|_| GitHubError::NetworkError)?;

    if let Some(errors) = response.errors {
        if let Some(first) = errors.into_iter().next() {
            return Err(match first.kind.as_deref() {
                Some("NOT_FOUND") => GitHubError::UserNotFound(first.message),
                _ => GitHubError::GraphQl(first.message),
            });
        }
    }

    let user = response
        .data
        .and_then(|data| data.user)
        .ok_or_else(|| GitHubError::GraphQl("Response contained no user data".to_string()))?;

    Ok(user
        .repositories
        .nodes
        .into_iter()
        .map(|node| Repository {
            name: node.name,
            languages: node
                .languages
                .edges
                .into_iter()
                .map(|edge| LanguageEdge {
                    size: edge.size,
                    name: edge.node.name,
                    color: edge.node.color,
                })
                .collect(),
        })
        .collect())
}
