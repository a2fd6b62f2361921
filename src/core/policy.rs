//! Override application policy.
//!
//! Pure decision logic, no I/O: given the current state of a target and the
//! probe winner (or the absence of one), compute the next state and whether
//! anything actually changed. A `false` change flag means no write, no
//! backup, and no timestamp bump.

use serde_json::{Map, Value};

use crate::core::candidate::ModelRef;
use crate::storage::session_store::SessionEntry;

/// What a failover run decided to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The first candidate whose probe succeeded.
    Winner(ModelRef),
    /// No candidate succeeded; fall back to the default.
    Default,
}

/// Compute the session entry state after applying `selection`.
///
/// Invariants enforced here:
/// - `providerOverride` and `modelOverride` are set and cleared together.
/// - Any change or reset of the pair also clears `authProfileOverride` and
///   `authProfileOverrideName`; a profile bound to the previous selection is
///   not valid under the new one.
/// - `updatedAt` is refreshed iff at least one field changed.
///
/// Fields the policy does not know about pass through untouched.
#[must_use]
pub fn apply_to_entry(
    entry: &SessionEntry,
    selection: &Selection,
    now_ms: i64,
) -> (SessionEntry, bool) {
    let mut next = entry.clone();
    let mut changed = false;

    match selection {
        Selection::Winner(winner) => {
            if next.provider_override.as_deref() != Some(winner.provider.as_str()) {
                next.provider_override = Some(winner.provider.clone());
                changed = true;
            }
            if next.model_override.as_deref() != Some(winner.model.as_str()) {
                next.model_override = Some(winner.model.clone());
                changed = true;
            }
        }
        Selection::Default => {
            if next.provider_override.take().is_some() {
                changed = true;
            }
            if next.model_override.take().is_some() {
                changed = true;
            }
        }
    }

    if next.auth_profile_override.take().is_some() {
        changed = true;
    }
    if next.auth_profile_override_name.take().is_some() {
        changed = true;
    }

    if changed {
        next.updated_at = Some(now_ms);
    }

    (next, changed)
}

/// Compute the global config document after recording `winner` as the
/// primary default model.
///
/// Produces a new document with exactly `agents.defaults.model.primary`
/// changed; sibling keys of the `model` object (fallback lists and the like)
/// survive untouched. There is no reset counterpart: a run where every
/// candidate is down leaves the global document as it was.
#[must_use]
pub fn apply_primary(doc: &Value, winner: &ModelRef) -> (Value, bool) {
    let target = winner.to_string();
    if primary_model(doc) == Some(target.as_str()) {
        return (doc.clone(), false);
    }

    let mut next = match doc {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    {
        let agents = ensure_object(&mut next, "agents");
        let defaults = ensure_object(agents, "defaults");
        let model = ensure_object(defaults, "model");
        model.insert("primary".to_string(), Value::String(target));
    }
    (Value::Object(next), true)
}

/// Read `agents.defaults.model.primary` from a config document.
#[must_use]
pub fn primary_model(doc: &Value) -> Option<&str> {
    doc.get("agents")?
        .get("defaults")?
        .get("model")?
        .get("primary")?
        .as_str()
}

fn ensure_object<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let slot = map
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(inner) => inner,
        _ => unreachable!("slot was just made an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_754_000_000_000;

    fn entry_with_override() -> SessionEntry {
        SessionEntry {
            provider_override: Some("openai".to_string()),
            model_override: Some("gpt-4o".to_string()),
            ..SessionEntry::default()
        }
    }

    #[test]
    fn winner_sets_both_override_fields_and_stamps() {
        let (next, changed) = apply_to_entry(
            &SessionEntry::default(),
            &Selection::Winner(ModelRef::new("anthropic", "claude-x")),
            NOW,
        );
        assert!(changed);
        assert_eq!(next.provider_override.as_deref(), Some("anthropic"));
        assert_eq!(next.model_override.as_deref(), Some("claude-x"));
        assert_eq!(next.updated_at, Some(NOW));
    }

    #[test]
    fn matching_winner_is_a_no_op() {
        let entry = entry_with_override();
        let (next, changed) = apply_to_entry(
            &entry,
            &Selection::Winner(ModelRef::new("openai", "gpt-4o")),
            NOW,
        );
        assert!(!changed);
        assert_eq!(next, entry);
        assert_eq!(next.updated_at, None, "no-op must not bump the timestamp");
    }

    #[test]
    fn winner_clears_auth_profile_overrides() {
        let mut entry = entry_with_override();
        entry.auth_profile_override = Some("profile-1".to_string());
        entry.auth_profile_override_name = Some("Work".to_string());

        let (next, changed) = apply_to_entry(
            &entry,
            &Selection::Winner(ModelRef::new("openai", "gpt-4o")),
            NOW,
        );
        // Pair unchanged, but stale auth profile fields still count as a change.
        assert!(changed);
        assert_eq!(next.provider_override.as_deref(), Some("openai"));
        assert!(next.auth_profile_override.is_none());
        assert!(next.auth_profile_override_name.is_none());
        assert_eq!(next.updated_at, Some(NOW));
    }

    #[test]
    fn default_clears_overrides_and_auth_profile() {
        let mut entry = entry_with_override();
        entry.auth_profile_override = Some("profile-1".to_string());

        let (next, changed) = apply_to_entry(&entry, &Selection::Default, NOW);
        assert!(changed);
        assert!(next.provider_override.is_none());
        assert!(next.model_override.is_none());
        assert!(next.auth_profile_override.is_none());
        assert_eq!(next.updated_at, Some(NOW));
    }

    #[test]
    fn default_on_clean_entry_changes_nothing() {
        let (next, changed) = apply_to_entry(&SessionEntry::default(), &Selection::Default, NOW);
        assert!(!changed);
        assert_eq!(next, SessionEntry::default());
    }

    #[test]
    fn unknown_entry_fields_pass_through() {
        let mut entry = entry_with_override();
        entry
            .extra
            .insert("label".to_string(), json!("main session"));

        let (next, changed) = apply_to_entry(&entry, &Selection::Default, NOW);
        assert!(changed);
        assert_eq!(next.extra.get("label"), Some(&json!("main session")));
    }

    #[test]
    fn apply_primary_preserves_sibling_fields() {
        let doc = json!({
            "agents": {
                "defaults": {
                    "model": {
                        "primary": "openai/gpt-4o",
                        "fallbacks": ["anthropic/claude-x"]
                    },
                    "workspace": "/srv/agents"
                }
            },
            "gateway": { "port": 18789 }
        });

        let (next, changed) =
            apply_primary(&doc, &ModelRef::new("anthropic", "claude-x"));
        assert!(changed);
        assert_eq!(primary_model(&next), Some("anthropic/claude-x"));
        assert_eq!(
            next["agents"]["defaults"]["model"]["fallbacks"],
            json!(["anthropic/claude-x"])
        );
        assert_eq!(next["agents"]["defaults"]["workspace"], json!("/srv/agents"));
        assert_eq!(next["gateway"]["port"], json!(18789));
    }

    #[test]
    fn apply_primary_is_a_no_op_when_already_current() {
        let doc = json!({
            "agents": { "defaults": { "model": { "primary": "openai/gpt-4o" } } }
        });
        let (next, changed) = apply_primary(&doc, &ModelRef::new("openai", "gpt-4o"));
        assert!(!changed);
        assert_eq!(next, doc);
    }

    #[test]
    fn apply_primary_builds_missing_structure() {
        let (next, changed) =
            apply_primary(&json!({}), &ModelRef::new("anthropic", "claude-x"));
        assert!(changed);
        assert_eq!(primary_model(&next), Some("anthropic/claude-x"));
    }

    #[test]
    fn apply_primary_replaces_a_non_object_model_value() {
        let doc = json!({
            "agents": { "defaults": { "model": "openai/gpt-4o" } }
        });
        let (next, changed) = apply_primary(&doc, &ModelRef::new("anthropic", "claude-x"));
        assert!(changed);
        assert_eq!(primary_model(&next), Some("anthropic/claude-x"));
    }
}
