//! Classification decision-order scenarios driven through the public API.

use std::sync::Arc;

use sui_sweep::classify::{AssetClassifier, TokenClassifier};
use sui_sweep::{AssetItem, ClassificationStatus, ClassifierConfig, RuleTables, TokenItem};

fn asset(package_id: &str, name: &str, description: &str) -> AssetItem {
    AssetItem {
        object_id: format!("{}::obj", package_id),
        object_type: format!("{}::nft::Nft", package_id),
        package_id: package_id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        image_url: String::new(),
        hidden: false,
        selected: false,
    }
}

fn token(package_id: &str, symbol: &str, formatted_balance: &str) -> TokenItem {
    TokenItem {
        coin_type: format!("{}::coin::{}", package_id, symbol),
        package_id: package_id.to_string(),
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        raw_balance: 1,
        decimals: 9,
        formatted_balance: formatted_balance.to_string(),
        icon_url: None,
        hidden: false,
        selected: false,
    }
}

fn asset_classifier() -> AssetClassifier {
    AssetClassifier::new(Arc::new(RuleTables::default()), ClassifierConfig::default())
}

fn token_classifier() -> TokenClassifier {
    TokenClassifier::new(Arc::new(RuleTables::default()), ClassifierConfig::default())
}

#[tokio::test]
async fn approved_prefix_always_wins() {
    // Metadata stuffed with scam language must not override the allow list.
    let verdict = asset_classifier()
        .classify(&asset(
            "0x2",
            "Claim your FREE MINT airdrop",
            "act now, limited time reward",
        ))
        .await;

    assert_eq!(verdict.status, ClassificationStatus::Legit);
    assert_eq!(verdict.confidence, 1.0);
}

#[tokio::test]
async fn keyword_scenario_flags_airdrop_spam() {
    let verdict = asset_classifier()
        .classify(&asset("0x2abc", "Claim your free airdrop now", ""))
        .await;

    // "0x2abc" starts with the approved "0x2" prefix, so prefix matching is
    // deliberately exercised with a package outside the allow list too.
    assert_eq!(verdict.status, ClassificationStatus::Legit);

    let verdict = asset_classifier()
        .classify(&asset("0x9f", "Claim your free airdrop now", ""))
        .await;
    assert_eq!(verdict.status, ClassificationStatus::Scam);
    assert_eq!(verdict.reason, "Suspicious keywords detected");
}

#[tokio::test]
async fn blocked_is_checked_after_approved() {
    let rules = RuleTables {
        approved_packages: vec!["0xaa".to_string()],
        blocked_packages: vec!["0xaa".to_string(), "0xbb".to_string()],
        ..Default::default()
    };
    let classifier = AssetClassifier::new(Arc::new(rules), ClassifierConfig::default());

    // Listed in both: approved wins because it is tested first.
    let verdict = classifier.classify(&asset("0xaa12", "x", "y")).await;
    assert_eq!(verdict.status, ClassificationStatus::Legit);

    let verdict = classifier.classify(&asset("0xbb12", "x", "y")).await;
    assert_eq!(verdict.status, ClassificationStatus::Scam);
    assert_eq!(verdict.confidence, 1.0);
}

#[test]
fn fake_usdc_scenario() {
    let verdict = token_classifier().classify(&token("0x5ca3", "USDC", "100.0"));

    assert_eq!(verdict.status, ClassificationStatus::Scam);
    assert_eq!(verdict.confidence, 0.95);
    assert_eq!(verdict.reason, "Fake USDC token");
}

#[test]
fn dust_scenario() {
    let verdict = token_classifier().classify(&token("0x5ca3", "XYZ", "0.00000003"));

    assert_eq!(verdict.status, ClassificationStatus::Dubious);
    assert_eq!(verdict.reason, "Dust amount (possible scam airdrop)");
}

#[test]
fn zero_balance_is_not_dust() {
    // Zero balances are filtered during materialization, but the classifier
    // must still not call them dust if handed one.
    let verdict = token_classifier().classify(&token("0x5ca3", "XYZ", "0"));
    assert_eq!(verdict.reason, "Unknown token - verify before interacting");
}
