//! Hidden-item sets and the capped user-action log.
//!
//! Hiding is local, reversible, and purely cosmetic; both operations are
//! idempotent. Reads tolerate a missing or corrupted backing store by
//! returning empty results, and write failures are logged and swallowed so a
//! broken disk never takes the app down with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

use super::LocalStore;
use crate::types::ItemKind;

const HIDDEN_ASSETS_KEY: &str = "sui-sweep-hidden-nfts";
const HIDDEN_TOKENS_KEY: &str = "sui-sweep-hidden-tokens";
const USER_ACTIONS_KEY: &str = "sui-sweep-user-actions";

/// Only the most recent entries are retained, oldest evicted first.
const ACTION_LOG_CAP: usize = 1000;

/// What the user did to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Hide,
    Unhide,
    Keep,
    Burn,
}

/// One entry in the user-action log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAction {
    pub identity: String,
    pub kind: ItemKind,
    pub action: ActionKind,
    pub timestamp: DateTime<Utc>,
}

/// Durable per-user preferences: hidden sets per kind plus the action log.
#[derive(Clone)]
pub struct PreferenceStore {
    store: Arc<dyn LocalStore>,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    fn hidden_key(kind: ItemKind) -> &'static str {
        match kind {
            ItemKind::Asset => HIDDEN_ASSETS_KEY,
            ItemKind::Token => HIDDEN_TOKENS_KEY,
        }
    }

    fn read_list<T: serde::de::DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let blob = match self.store.get(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key, error = %err, "preference read failed, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&blob) {
            Ok(list) => list,
            Err(err) => {
                warn!(key, error = %err, "preference blob corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    fn write_list<T: Serialize>(&self, key: &str, list: &[T]) {
        let blob = match serde_json::to_string(list) {
            Ok(blob) => blob,
            Err(err) => {
                warn!(key, error = %err, "preference serialization failed");
                return;
            }
        };
        if let Err(err) = self.store.put(key, &blob) {
            warn!(key, error = %err, "preference write failed, state not persisted");
        }
    }

    /// Adds `identity` to the hidden set for `kind`. No-op if already hidden.
    pub fn hide(&self, kind: ItemKind, identity: &str) {
        let key = Self::hidden_key(kind);
        let mut hidden: Vec<String> = self.read_list(key);
        if !hidden.iter().any(|id| id == identity) {
            hidden.push(identity.to_string());
            self.write_list(key, &hidden);
        }
    }

    /// Removes `identity` from the hidden set for `kind`. No-op if not hidden.
    pub fn unhide(&self, kind: ItemKind, identity: &str) {
        let key = Self::hidden_key(kind);
        let hidden: Vec<String> = self.read_list(key);
        if hidden.iter().any(|id| id == identity) {
            let remaining: Vec<String> =
                hidden.into_iter().filter(|id| id != identity).collect();
            self.write_list(key, &remaining);
        }
    }

    pub fn is_hidden(&self, kind: ItemKind, identity: &str) -> bool {
        self.read_list::<String>(Self::hidden_key(kind))
            .iter()
            .any(|id| id == identity)
    }

    /// The current hidden set for `kind`.
    pub fn hidden(&self, kind: ItemKind) -> HashSet<String> {
        self.read_list::<String>(Self::hidden_key(kind))
            .into_iter()
            .collect()
    }

    /// Appends to the action log, evicting the oldest entries past the cap.
    pub fn log_action(&self, identity: &str, kind: ItemKind, action: ActionKind) {
        let mut actions: Vec<UserAction> = self.read_list(USER_ACTIONS_KEY);
        actions.push(UserAction {
            identity: identity.to_string(),
            kind,
            action,
            timestamp: Utc::now(),
        });
        if actions.len() > ACTION_LOG_CAP {
            let excess = actions.len() - ACTION_LOG_CAP;
            actions.drain(..excess);
        }
        self.write_list(USER_ACTIONS_KEY, &actions);
    }

    /// The retained action log, oldest first.
    pub fn actions(&self) -> Vec<UserAction> {
        self.read_list(USER_ACTIONS_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store() -> PreferenceStore {
        PreferenceStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_hide_is_idempotent() {
        let prefs = store();
        prefs.hide(ItemKind::Asset, "0xabc");
        prefs.hide(ItemKind::Asset, "0xabc");

        let hidden = prefs.hidden(ItemKind::Asset);
        assert_eq!(hidden.len(), 1);
        assert!(hidden.contains("0xabc"));
    }

    #[test]
    fn test_unhide_never_hidden_is_noop() {
        let prefs = store();
        prefs.unhide(ItemKind::Asset, "0xabc");
        assert!(prefs.hidden(ItemKind::Asset).is_empty());
    }

    #[test]
    fn test_kinds_are_namespaced() {
        let prefs = store();
        prefs.hide(ItemKind::Asset, "0xabc");

        assert!(prefs.is_hidden(ItemKind::Asset, "0xabc"));
        assert!(!prefs.is_hidden(ItemKind::Token, "0xabc"));
    }

    #[test]
    fn test_hide_then_unhide() {
        let prefs = store();
        prefs.hide(ItemKind::Token, "0x2::sui::SUI");
        assert!(prefs.is_hidden(ItemKind::Token, "0x2::sui::SUI"));

        prefs.unhide(ItemKind::Token, "0x2::sui::SUI");
        assert!(!prefs.is_hidden(ItemKind::Token, "0x2::sui::SUI"));
    }

    #[test]
    fn test_action_log_caps_at_most_recent() {
        let prefs = store();
        for i in 0..1005 {
            prefs.log_action(&format!("0x{i}"), ItemKind::Asset, ActionKind::Hide);
        }

        let actions = prefs.actions();
        assert_eq!(actions.len(), 1000);
        // Oldest entries were evicted first.
        assert_eq!(actions.first().unwrap().identity, "0x5");
        assert_eq!(actions.last().unwrap().identity, "0x1004");
    }

    #[test]
    fn test_corrupt_blob_reads_as_empty() {
        let backing = Arc::new(MemoryStore::new());
        backing.put(HIDDEN_ASSETS_KEY, "not json at all").unwrap();

        let prefs = PreferenceStore::new(backing);
        assert!(prefs.hidden(ItemKind::Asset).is_empty());

        // And the store recovers on the next write.
        prefs.hide(ItemKind::Asset, "0xabc");
        assert!(prefs.is_hidden(ItemKind::Asset, "0xabc"));
    }
}
