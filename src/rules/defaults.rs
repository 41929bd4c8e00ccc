//! Curated seed data for the rule tables.
//!
//! Community-maintained lists; extend these as new collections and scam
//! campaigns are reported.

/// Verified package ids on Sui mainnet (prefix match).
pub(crate) const APPROVED_PACKAGES: &[&str] = &[
    // Official Sui framework
    "0x2",
];

/// Packages reported as scam/spam by the community (prefix match).
pub(crate) const BLOCKED_PACKAGES: &[&str] = &[];

/// Promotional/phishing language commonly found in spam NFT metadata.
pub(crate) const SCAM_KEYWORDS: &[&str] = &[
    "airdrop",
    "claim",
    "free mint",
    "reward",
    "giveaway",
    "act now",
    "limited time",
    "connect wallet",
    "verify",
    "eligible",
];

/// Known legitimate coin package ids on Sui mainnet.
pub(crate) const APPROVED_TOKENS: &[&str] = &[
    "0x2",                                                                // SUI
    "0xdba34672e30cb065b1f93e3ab55318768fd6fef66c15942c9f7cb846e2f900e7", // USDC
    "0xc060006111016b8a020ad5b33834984a437aaa7d3c74c18e09a95d48aceab08c", // USDT
    "0xa99b8952d4f7d947ea77fe0ecdcc9e5fc0bcab2841d6e2a5aa00c3044e5544b5", // WETH
    "0x27792d9fed7f9844eb4839566001bb6f6cb4804f66aa2da6fe1ee242d896881",  // WBTC
    "0x5d4b302506645c37ff133b98c4b50a5ae14841659738d6d733d59d0d217a93bf", // CETUS
    "0x06864a6f921804860930db6ddbe2e16acdf8504495ea7481637a1c8b9a8fe54b", // TURBOS
    "0x549e8b69270defbfafd4f94e17ec44cdbdd99820b33bda2278dea3b9a32d3f55", // BLUB
    "0x76cb819b01abed502bee8a702b4c2d547532c12f25001c9dea795a5e631c26f1", // FUD
];

/// Known scam coin package ids.
pub(crate) const BLOCKED_TOKENS: &[&str] = &[];

/// Suspicious substrings in token names and symbols.
pub(crate) const TOKEN_KEYWORDS: &[&str] = &[
    "airdrop", "claim", "free", "reward", "bonus", "gift", "promo", "giveaway", "official",
    "verify", "connect", "wallet", "limited", "urgent", "act now", "double", "triple", "100x",
    "1000x", "moon", "elon", "trump", "pepe2", "shib2", "doge2",
];

/// High-value symbols that scammers commonly impersonate. Only the approved
/// issuer may legitimately claim one of these.
pub(crate) const PROTECTED_SYMBOLS: &[&str] =
    &["SUI", "USDC", "USDT", "WETH", "WBTC", "ETH", "BTC"];
