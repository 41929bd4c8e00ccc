//! Wallet scanning and working-set materialization.
//!
//! The chain-query collaborator enumerates owned objects and balances; this
//! module turns the raw records into display items: coin objects are excluded
//! from the asset set, zero balances are dropped, raw balances are rendered
//! as decimal strings, and hidden flags are merged in from the preference
//! store. Items are materialized fresh on every scan.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::store::PreferenceStore;
use crate::types::{AssetItem, ItemKind, TokenItem};

/// Raw owned object as reported by the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAsset {
    pub object_id: String,
    pub object_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

/// Raw coin balance as reported by the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBalance {
    pub coin_type: String,
    pub total_balance: u128,
    pub decimals: u8,
}

/// Chain-query collaborator: slow, possibly erroring, re-runnable.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    async fn list_owned_assets(&self, owner: &str) -> Result<Vec<RawAsset>>;
    async fn list_owned_token_balances(&self, owner: &str) -> Result<Vec<RawBalance>>;
}

/// Package id is the type prefix before the first `::`.
pub fn package_id(type_tag: &str) -> String {
    type_tag
        .split("::")
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Symbol is the last `::` segment of the coin type.
pub fn symbol_of(coin_type: &str) -> String {
    coin_type
        .rsplit("::")
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("UNKNOWN")
        .to_string()
}

/// Coin objects are fungible balances, not assets.
pub fn is_coin_type(object_type: &str) -> bool {
    object_type.contains("::coin::")
}

/// Renders base units as a decimal string, trailing zeros trimmed.
pub fn format_units(raw: u128, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }
    let digits = raw.to_string();
    let width = decimals as usize;
    let (int_part, frac_part) = if digits.len() > width {
        let split = digits.len() - width;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits))
    };
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        int_part
    } else {
        format!("{}.{}", int_part, frac)
    }
}

/// Materializes the wallet's asset working set.
pub async fn load_assets(
    chain: &dyn ChainQuery,
    prefs: &PreferenceStore,
    owner: &str,
) -> Result<Vec<AssetItem>> {
    let raw = chain.list_owned_assets(owner).await?;
    let hidden = prefs.hidden(ItemKind::Asset);

    let assets = raw
        .into_iter()
        .filter(|obj| !is_coin_type(&obj.object_type))
        .map(|obj| {
            let package = package_id(&obj.object_type);
            AssetItem {
                hidden: hidden.contains(&obj.object_id),
                object_id: obj.object_id,
                package_id: package,
                object_type: obj.object_type,
                name: obj.name,
                description: obj.description,
                image_url: obj.image_url,
                selected: false,
            }
        })
        .collect();
    Ok(assets)
}

/// Materializes the wallet's token working set, excluding zero balances.
pub async fn load_tokens(
    chain: &dyn ChainQuery,
    prefs: &PreferenceStore,
    owner: &str,
) -> Result<Vec<TokenItem>> {
    let raw = chain.list_owned_token_balances(owner).await?;
    let hidden = prefs.hidden(ItemKind::Token);

    let tokens = raw
        .into_iter()
        .filter(|balance| balance.total_balance > 0)
        .map(|balance| {
            let symbol = symbol_of(&balance.coin_type);
            TokenItem {
                package_id: package_id(&balance.coin_type),
                symbol: symbol.clone(),
                name: symbol,
                raw_balance: balance.total_balance,
                decimals: balance.decimals,
                formatted_balance: format_units(balance.total_balance, balance.decimals),
                icon_url: None,
                hidden: hidden.contains(&balance.coin_type),
                coin_type: balance.coin_type,
                selected: false,
            }
        })
        .collect();
    Ok(tokens)
}
