//! Fungible token classification.
//!
//! Synchronous, no network call. Decision order: approved, blocked,
//! protected-symbol impersonation, name/symbol keywords, dust amount,
//! default. Only the approved issuer may legitimately claim a protected
//! symbol, so any other issuer using one is presumed an impersonation.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use super::Classify;
use crate::config::ClassifierConfig;
use crate::errors::Result;
use crate::rules::RuleTables;
use crate::types::{Classification, ClassificationStatus, TokenItem};

pub struct TokenClassifier {
    rules: Arc<RuleTables>,
    config: ClassifierConfig,
}

impl TokenClassifier {
    pub fn new(rules: Arc<RuleTables>, config: ClassifierConfig) -> Self {
        Self { rules, config }
    }

    /// Produces exactly one verdict for the token.
    pub fn classify(&self, token: &TokenItem) -> Classification {
        // 1. Approved coin packages.
        if self.rules.matches_approved_token(&token.package_id) {
            return Classification::new(ClassificationStatus::Legit, 1.0, "Verified token");
        }

        // 2. Blocked coin packages.
        if self.rules.matches_blocked_token(&token.package_id) {
            return Classification::new(ClassificationStatus::Scam, 1.0, "Known scam token");
        }

        // 3. Protected symbol claimed by an unapproved issuer.
        if let Some(symbol) = self.rules.protected_symbol(&token.symbol) {
            return Classification::new(
                ClassificationStatus::Scam,
                self.config.impersonation_confidence,
                format!("Fake {} token", symbol),
            );
        }

        // 4. Suspicious name or symbol.
        if let Some(keyword) = self.rules.token_keyword_hit(&token.name, &token.symbol) {
            debug!(coin_type = %token.coin_type, keyword, "token keyword matched");
            return Classification::new(
                ClassificationStatus::Scam,
                self.config.keyword_confidence,
                "Suspicious token name",
            );
        }

        // 5. Dust amounts are a common airdrop-spam signature.
        if let Ok(balance) = Decimal::from_str(&token.formatted_balance) {
            if balance > Decimal::ZERO && balance < self.config.dust_threshold {
                return Classification::new(
                    ClassificationStatus::Dubious,
                    self.config.dust_confidence,
                    "Dust amount (possible scam airdrop)",
                );
            }
        }

        // 6. Nothing known about it.
        Classification::new(
            ClassificationStatus::Dubious,
            self.config.default_confidence,
            "Unknown token - verify before interacting",
        )
    }
}

#[async_trait]
impl Classify<TokenItem> for TokenClassifier {
    async fn classify(&self, item: &TokenItem) -> Result<Classification> {
        Ok(TokenClassifier::classify(self, item))
    }
}
