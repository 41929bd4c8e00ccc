//! Static classification rule tables.
//!
//! Allow/deny lists and keyword sets are plain data, loaded at startup and
//! read-only at runtime. Classifier logic only ever performs membership,
//! prefix, and substring tests against them; every comparison is
//! case-insensitive.

mod defaults;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::Result;

/// The complete rule set consulted by both classifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTables {
    /// Verified package id prefixes (assets).
    pub approved_packages: Vec<String>,
    /// Reported scam package id prefixes (assets).
    pub blocked_packages: Vec<String>,
    /// Phishing-language substrings matched against asset metadata.
    pub scam_keywords: Vec<String>,
    /// Verified coin package ids (substring match).
    pub approved_tokens: Vec<String>,
    /// Reported scam coin package ids (substring match).
    pub blocked_tokens: Vec<String>,
    /// Suspicious substrings matched against token names and symbols.
    pub token_keywords: Vec<String>,
    /// Symbols only the approved issuer may legitimately claim.
    pub protected_symbols: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for RuleTables {
    fn default() -> Self {
        Self {
            approved_packages: owned(defaults::APPROVED_PACKAGES),
            blocked_packages: owned(defaults::BLOCKED_PACKAGES),
            scam_keywords: owned(defaults::SCAM_KEYWORDS),
            approved_tokens: owned(defaults::APPROVED_TOKENS),
            blocked_tokens: owned(defaults::BLOCKED_TOKENS),
            token_keywords: owned(defaults::TOKEN_KEYWORDS),
            protected_symbols: owned(defaults::PROTECTED_SYMBOLS),
        }
    }
}

impl RuleTables {
    /// Loads replacement tables from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Package id starts with an approved prefix.
    pub fn matches_approved_package(&self, package_id: &str) -> bool {
        let id = package_id.to_lowercase();
        self.approved_packages
            .iter()
            .any(|p| id.starts_with(&p.to_lowercase()))
    }

    /// Package id starts with a blocked prefix.
    pub fn matches_blocked_package(&self, package_id: &str) -> bool {
        let id = package_id.to_lowercase();
        self.blocked_packages
            .iter()
            .any(|p| id.starts_with(&p.to_lowercase()))
    }

    /// First scam keyword contained in `text`, if any.
    pub fn keyword_hit<'a>(&'a self, text: &str) -> Option<&'a str> {
        let lower = text.to_lowercase();
        self.scam_keywords
            .iter()
            .find(|k| lower.contains(&k.to_lowercase()))
            .map(|k| k.as_str())
    }

    /// Token package id contains an approved coin package id.
    pub fn matches_approved_token(&self, package_id: &str) -> bool {
        let id = package_id.to_lowercase();
        self.approved_tokens
            .iter()
            .any(|t| id.contains(&t.to_lowercase()))
    }

    /// Token package id contains a blocked coin package id.
    pub fn matches_blocked_token(&self, package_id: &str) -> bool {
        let id = package_id.to_lowercase();
        self.blocked_tokens
            .iter()
            .any(|t| id.contains(&t.to_lowercase()))
    }

    /// The canonical (upper-case) protected symbol matching `symbol`, if any.
    pub fn protected_symbol(&self, symbol: &str) -> Option<&str> {
        let upper = symbol.to_uppercase();
        self.protected_symbols
            .iter()
            .find(|s| s.to_uppercase() == upper)
            .map(|s| s.as_str())
    }

    /// First suspicious substring found in the token name or symbol, if any.
    pub fn token_keyword_hit<'a>(&'a self, name: &str, symbol: &str) -> Option<&'a str> {
        let name = name.to_lowercase();
        let symbol = symbol.to_lowercase();
        self.token_keywords
            .iter()
            .find(|k| {
                let k = k.to_lowercase();
                name.contains(&k) || symbol.contains(&k)
            })
            .map(|k| k.as_str())
    }
}
