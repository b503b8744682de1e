//! The response pipeline: validate, fetch, aggregate, overlay, render, emit.
//!
//! Every path out of here is an SVG document; failures become error cards
//! rather than bare HTTP errors. The pipeline owns cache-control derivation
//! so callers (server and CLI alike) just forward headers.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::colors;
use crate::config::{CardConfig, STALE_WHILE_REVALIDATE_SECONDS};
use crate::errors::CardError;
use crate::github::FetchStats;
use crate::options::{CardOptions, Validator};
use crate::render;
use crate::stats;

/// Content type shared by every response this pipeline produces.
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Cache policy for error cards: transient failures must not be CDN-pinned.
pub const ERROR_CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";

/// A rendered card plus the cache policy it should be served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardResponse {
    /// The SVG document
    pub body: String,
    /// Value for the `Cache-Control` header
    pub cache_control: String,
}

/// Cache-control value for successful card responses.
pub fn success_cache_control(card_config: &CardConfig) -> String {
    format!(
        "max-age={0}, s-maxage={0}, stale-while-revalidate={1}",
        card_config.cache_seconds, STALE_WHILE_REVALIDATE_SECONDS
    )
}

/// Runs one request through the pipeline.
///
/// Validation runs first and in full, so a blacklisted username or a bad
/// layout/locale never reaches the fetch collaborator. Fetch failures
/// surface as error cards carrying the upstream message. Aggregation and
/// the color overlay cannot fail.
pub async fn respond<F>(
    fetcher: &F,
    validator: &Validator,
    card_config: &CardConfig,
    query: &HashMap<String, String>,
) -> CardResponse
where
    F: FetchStats + Sync,
{
    let request = match validator.validate(query) {
        Ok(request) => request,
        Err(error) => {
            debug!("Request rejected: {:?}", error);
            return error_response(&error, &CardOptions::default());
        }
    };

    let repositories = match fetcher.fetch_top_languages(&request.username).await {
        Ok(repositories) => repositories,
        Err(error) => {
            warn!(username = %request.username, "Fetch failed: {}", error);
            return error_response(&CardError::from(error), &request.options);
        }
    };

    let profile = stats::aggregate(&repositories);
    let profile = colors::apply_language_color_overrides(&profile, Some(&request.options.lang_colors));

    debug!(
        username = %request.username,
        languages = profile.len(),
        "Rendering language card"
    );

    CardResponse {
        body: render::render_card(&profile, &request.options),
        cache_control: success_cache_control(card_config),
    }
}

fn error_response(error: &CardError, options: &CardOptions) -> CardResponse {
    CardResponse {
        body: render::render_error_card(error, options),
        cache_control: ERROR_CACHE_CONTROL.to_string(),
    }
}
