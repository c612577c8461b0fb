//! Parser configuration.
//!
//! Plain data with `Default`s matching the documented contract. The
//! [`ParserConfig::fingerprint`] string participates in the cache key so that
//! two parses of the same text under different options never share an entry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Options that affect parsing, validation, and caching behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Promote recognizer errors to fatal parse failures.
    pub strict_mode: bool,
    /// Expand shorthand patterns (volteo, rango, ...) during recognition.
    pub auto_expand: bool,
    /// Treat a declared-vs-calculated mismatch of ≥ 1.00 as an error.
    pub validate_totals: bool,
    /// Cap on player blocks per parse; exceeding it aborts.
    pub max_jugadores: usize,
    /// Display-only currency symbol.
    pub currency_symbol: String,
    /// Canonical decimal mark for amounts.
    pub decimal_separator: char,
    /// Permit negative amounts.
    pub allow_negative: bool,
    /// Per-bet amount above which validation warns.
    pub max_monto: Decimal,
    /// Stake used when a line names numbers but no amount.
    pub default_monto_fijo: Decimal,
    /// Corrido stake used when omitted; zero disables the implicit corrido.
    pub default_monto_corrido: Decimal,
    /// Cap on numbers a single line may expand to.
    pub max_expansion: usize,
    /// Wall-clock budget for one parse call, in milliseconds.
    pub timeout_ms: u64,
    pub cache: CacheConfig,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            strict_mode: false,
            auto_expand: true,
            validate_totals: true,
            max_jugadores: 100,
            currency_symbol: "$".to_string(),
            decimal_separator: '.',
            allow_negative: false,
            max_monto: Decimal::new(1_000_000, 0),
            default_monto_fijo: Decimal::ONE,
            default_monto_corrido: Decimal::ZERO,
            max_expansion: 1000,
            timeout_ms: 5000,
            cache: CacheConfig::default(),
        }
    }
}

impl ParserConfig {
    /// Stable textual digest of every option that can change parse output.
    /// Combined with the input hash to form the cache key.
    pub(crate) fn fingerprint(&self) -> String {
        format!(
            "strict={};expand={};totals={};max_jug={};sep={};neg={};max_monto={};fijo={};corrido={};max_exp={}",
            self.strict_mode,
            self.auto_expand,
            self.validate_totals,
            self.max_jugadores,
            self.decimal_separator,
            self.allow_negative,
            self.max_monto,
            self.default_monto_fijo,
            self.default_monto_corrido,
            self.max_expansion,
        )
    }
}

/// Result-cache behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_ms: u64,
    pub max_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig { enabled: true, ttl_ms: 300_000, max_size: 1000 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_tracks_semantic_options() {
        let base = ParserConfig::default();
        let mut strict = ParserConfig::default();
        strict.strict_mode = true;

        assert_eq!(base.fingerprint(), ParserConfig::default().fingerprint());
        assert_ne!(base.fingerprint(), strict.fingerprint());
    }

    #[test]
    fn defaults_match_contract() {
        let cfg = ParserConfig::default();
        assert!(cfg.auto_expand);
        assert!(cfg.validate_totals);
        assert!(!cfg.strict_mode);
        assert_eq!(cfg.max_jugadores, 100);
        assert_eq!(cfg.default_monto_fijo, Decimal::ONE);
        assert_eq!(cfg.timeout_ms, 5000);
        assert!(cfg.cache.enabled);
        assert_eq!(cfg.cache.ttl_ms, 300_000);
        assert_eq!(cfg.cache.max_size, 1000);
    }
}
