use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency code as reported by the venue (e.g. "BTC")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Currency(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Currency::new(code)
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Currency(code)
    }
}

/// A base/quote trading pair. The venue symbol is the concatenation of the
/// two codes (e.g. "BTCUSD").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    pub fn new(base: impl Into<Currency>, quote: impl Into<Currency>) -> Self {
        CurrencyPair {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// The pair rendered as the venue symbol
    pub fn symbol(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_concatenates_codes() {
        let pair = CurrencyPair::new("BTC", "USD");
        assert_eq!(pair.symbol(), "BTCUSD");
        assert_eq!(pair.to_string(), "BTC/USD");
    }

    #[test]
    fn test_currency_from_str() {
        let currency: Currency = "ETH".into();
        assert_eq!(currency.as_str(), "ETH");
    }
}
