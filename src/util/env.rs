//! Environment variable and terminal detection helpers.

use std::io::IsTerminal;

/// Read an environment variable, treating blank values as unset.
#[must_use]
pub fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// First non-empty variable from `names`.
#[must_use]
pub fn first_non_empty_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| non_empty_var(name))
}

/// Conventional credential variable for a provider.
///
/// The provider name is uppercased, every non-alphanumeric character becomes
/// `_`, and `_API_KEY` is appended (`my-provider` -> `MY_PROVIDER_API_KEY`).
#[must_use]
pub fn provider_key_var(provider: &str) -> String {
    let mut name: String = provider
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    name.push_str("_API_KEY");
    name
}

/// Check if color should be enabled.
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
        return false;
    }

    std::io::stdout().is_terminal()
}
