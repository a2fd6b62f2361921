//! Candidate availability probing.
//!
//! A probe answers one question, "is this provider/model usable right now",
//! within a bounded amount of time. It never errors: missing credentials,
//! network failures, non-success responses, and timeouts all collapse into
//! "unavailable" so that a single flaky provider cannot abort a failover run.

use std::time::Duration;

use reqwest::Client;

use crate::core::candidate::ModelRef;
use crate::util::env;

/// Default probe timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Suffix marking providers backed by a local command-line tool.
const LOCAL_CLI_SUFFIX: &str = "-cli";

/// How a hosted endpoint expects its credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`.
    Bearer,
    /// `x-api-key: <key>`.
    ApiKeyHeader,
}

/// Connection details for a hosted provider API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedEndpoint {
    /// Default API base URL.
    pub base: &'static str,
    /// Environment variable overriding the base URL.
    pub base_env: &'static str,
    /// Credential variables, first non-empty wins.
    pub key_envs: &'static [&'static str],
    pub auth: AuthScheme,
}

/// Probe behavior for a provider family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStrategy {
    /// Hosted API with a model-existence endpoint.
    Hosted(HostedEndpoint),
    /// Local CLI-backed provider, managed outside this tool.
    LocalCli,
    /// Unknown provider; available iff its conventional API key variable is set.
    EnvKey,
}

impl ProbeStrategy {
    /// Classify a provider by its normalized name.
    #[must_use]
    pub fn for_provider(provider: &str) -> Self {
        let name = provider.trim().to_ascii_lowercase();
        if name.ends_with(LOCAL_CLI_SUFFIX) {
            return Self::LocalCli;
        }
        match name.as_str() {
            "openai" => Self::Hosted(HostedEndpoint {
                base: "https://api.openai.com/v1",
                base_env: "OPENAI_API_BASE",
                key_envs: &["OPENAI_API_KEY"],
                auth: AuthScheme::Bearer,
            }),
            "anthropic" => Self::Hosted(HostedEndpoint {
                base: "https://api.anthropic.com/v1",
                base_env: "ANTHROPIC_API_BASE",
                key_envs: &["ANTHROPIC_API_KEY", "ANTHROPIC_API_KEY_0"],
                auth: AuthScheme::ApiKeyHeader,
            }),
            name if name.contains("minimax") => Self::Hosted(HostedEndpoint {
                base: "https://api.minimax.ai/v1",
                base_env: "MINIMAX_API_BASE",
                key_envs: &["MINIMAX_API_KEY", "MINIMAX_KEY"],
                auth: AuthScheme::Bearer,
            }),
            _ => Self::EnvKey,
        }
    }
}

/// Check whether a candidate is currently usable.
///
/// Resolves within `timeout` and never raises. Hosted providers get a single
/// read-only existence check against their model-listing endpoint; local CLI
/// backends are assumed available; unknown providers are available when their
/// conventional credential variable is present.
pub async fn probe(client: &Client, candidate: &ModelRef, timeout: Duration) -> bool {
    match ProbeStrategy::for_provider(&candidate.provider) {
        ProbeStrategy::LocalCli => true,
        ProbeStrategy::EnvKey => {
            let var = env::provider_key_var(&candidate.provider);
            let present = env::non_empty_var(&var).is_some();
            if !present {
                tracing::debug!(provider = %candidate.provider, var, "credential variable not set");
            }
            present
        }
        ProbeStrategy::Hosted(endpoint) => {
            probe_hosted(client, candidate, &endpoint, timeout).await
        }
    }
}

async fn probe_hosted(
    client: &Client,
    candidate: &ModelRef,
    endpoint: &HostedEndpoint,
    timeout: Duration,
) -> bool {
    let Some(key) = env::first_non_empty_var(endpoint.key_envs) else {
        tracing::debug!(
            provider = %candidate.provider,
            "no credential configured, skipping network probe"
        );
        return false;
    };

    let base = env::non_empty_var(endpoint.base_env).unwrap_or_else(|| endpoint.base.to_string());
    let Some(url) = model_url(&base, &candidate.model) else {
        tracing::warn!(provider = %candidate.provider, base, "invalid API base URL");
        return false;
    };

    let request = match endpoint.auth {
        AuthScheme::Bearer => client.get(url).bearer_auth(&key),
        AuthScheme::ApiKeyHeader => client.get(url).header("x-api-key", &key),
    };

    // Dropping the in-flight future on deadline cancels the request.
    match tokio::time::timeout(timeout, request.send()).await {
        Ok(Ok(response)) => response.status().is_success(),
        Ok(Err(err)) => {
            tracing::debug!(provider = %candidate.provider, error = %err, "probe request failed");
            false
        }
        Err(_) => {
            tracing::debug!(provider = %candidate.provider, ?timeout, "probe timed out");
            false
        }
    }
}

/// `<base>/models/<model>` with the model percent-encoded as a path segment.
fn model_url(base: &str, model: &str) -> Option<reqwest::Url> {
    let mut url = reqwest::Url::parse(base).ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push("models")
        .push(model);
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosted_providers_are_classified_with_their_auth_scheme() {
        let ProbeStrategy::Hosted(openai) = ProbeStrategy::for_provider("openai") else {
            panic!("openai should be hosted");
        };
        assert_eq!(openai.auth, AuthScheme::Bearer);

        let ProbeStrategy::Hosted(anthropic) = ProbeStrategy::for_provider("Anthropic") else {
            panic!("anthropic should be hosted");
        };
        assert_eq!(anthropic.auth, AuthScheme::ApiKeyHeader);
        assert_eq!(
            anthropic.key_envs,
            &["ANTHROPIC_API_KEY", "ANTHROPIC_API_KEY_0"][..]
        );
    }

    #[test]
    fn minimax_variants_share_one_endpoint() {
        assert!(matches!(
            ProbeStrategy::for_provider("minimax"),
            ProbeStrategy::Hosted(_)
        ));
        assert!(matches!(
            ProbeStrategy::for_provider("minimax-portal"),
            ProbeStrategy::Hosted(_)
        ));
    }

    #[test]
    fn cli_suffix_means_local() {
        assert_eq!(ProbeStrategy::for_provider("claude-cli"), ProbeStrategy::LocalCli);
        assert_eq!(ProbeStrategy::for_provider("codex-cli"), ProbeStrategy::LocalCli);
        assert_eq!(ProbeStrategy::for_provider("anything-cli"), ProbeStrategy::LocalCli);
    }

    #[test]
    fn unknown_providers_fall_back_to_env_key() {
        assert_eq!(ProbeStrategy::for_provider("openrouter"), ProbeStrategy::EnvKey);
        assert_eq!(ProbeStrategy::for_provider(""), ProbeStrategy::EnvKey);
    }

    #[test]
    fn model_url_appends_and_encodes_the_model_segment() {
        let url = model_url("https://api.openai.com/v1", "gpt-4o").unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/models/gpt-4o");

        let url = model_url("https://api.openai.com/v1/", "a b/c").unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/models/a%20b%2Fc");

        assert!(model_url("not a url", "gpt-4o").is_none());
    }
}
