//! Candidate model references and list parsing.

use std::fmt;

/// A `provider/model` pair considered as a possible selection.
///
/// Candidate lists are a priority order, highest priority first. Both fields
/// are non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelRef {
    pub provider: String,
    pub model: String,
}

impl ModelRef {
    #[must_use]
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }

    /// Parse a single `provider/model` token.
    ///
    /// Splits on the first `/`. Returns `None` when the separator is missing
    /// or either side is empty.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let (provider, model) = token.trim().split_once('/')?;
        if provider.is_empty() || model.is_empty() {
            return None;
        }
        Some(Self::new(provider, model))
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.model)
    }
}

/// Parse a comma-separated candidate list.
///
/// Malformed tokens are dropped with a warning rather than failing the whole
/// batch. Order is preserved and duplicates are kept; probing stops at the
/// first success, so the first occurrence wins naturally. The caller treats
/// an empty result as a configuration error.
#[must_use]
pub fn parse_candidates(raw: &str) -> Vec<ModelRef> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let parsed = ModelRef::parse(token);
            if parsed.is_none() {
                tracing::warn!(token, "skipping malformed candidate");
            }
            parsed
        })
        .collect()
}
