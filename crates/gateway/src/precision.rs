//! Startup symbol precision resolution
//!
//! Derives the price tick for the configured pair from the venue's symbol
//! metadata. Runs once before gateway construction completes; a pair the
//! venue does not list is fatal to startup.

use rust_decimal::Decimal;

use crate::error::GatewayError;
use crate::venue::VenueApi;

/// Price tick parameters for the configured pair, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolPrecision {
    /// Fractional digits observed in the venue's recent OHLC sample
    pub precision: u32,
    /// Minimum price movement: 10^-precision
    pub tick_increment: Decimal,
}

/// Count of fractional digits in `value` (0 for integers)
fn fractional_digits(value: Decimal) -> u32 {
    value.normalize().scale()
}

/// Resolve price precision for `symbol` from the venue market listing.
///
/// Precision is the maximum fractional-digit count across the sample's
/// open/high/low values; the tick increment follows as 10^-precision.
pub async fn resolve_symbol_precision(
    venue: &dyn VenueApi,
    symbol: &str,
) -> Result<SymbolPrecision, GatewayError> {
    let markets = venue.load_markets().await?;

    for details in &markets {
        if details.symbol == symbol {
            let precision = fractional_digits(details.info.open)
                .max(fractional_digits(details.info.high))
                .max(fractional_digits(details.info.low));

            return Ok(SymbolPrecision {
                precision,
                tick_increment: Decimal::new(1, precision),
            });
        }
    }

    Err(GatewayError::SymbolNotFound(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::{
        OhlcSample, OrderAck, RawBalance, RawOrderBook, RawTrade, SymbolDetails, VenueError,
        VenueOrder, VenueResult,
    };
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    struct ListingVenue {
        markets: Vec<SymbolDetails>,
    }

    #[async_trait]
    impl VenueApi for ListingVenue {
        async fn fetch_trades(&self, _symbol: &str) -> VenueResult<Vec<RawTrade>> {
            Err(VenueError::new("not scripted"))
        }

        async fn fetch_order_book(&self, _symbol: &str) -> VenueResult<RawOrderBook> {
            Err(VenueError::new("not scripted"))
        }

        async fn fetch_balance(&self) -> VenueResult<HashMap<String, RawBalance>> {
            Err(VenueError::new("not scripted"))
        }

        async fn create_limit_buy_order(
            &self,
            _symbol: &str,
            _quantity: Decimal,
            _price: Decimal,
        ) -> VenueResult<OrderAck> {
            Err(VenueError::new("not scripted"))
        }

        async fn create_limit_sell_order(
            &self,
            _symbol: &str,
            _quantity: Decimal,
            _price: Decimal,
        ) -> VenueResult<OrderAck> {
            Err(VenueError::new("not scripted"))
        }

        async fn cancel_order(&self, _exchange_id: &str) -> VenueResult<()> {
            Err(VenueError::new("not scripted"))
        }

        async fn fetch_open_orders(&self) -> VenueResult<Vec<VenueOrder>> {
            Err(VenueError::new("not scripted"))
        }

        async fn load_markets(&self) -> VenueResult<Vec<SymbolDetails>> {
            Ok(self.markets.clone())
        }
    }

    fn listing(symbol: &str, open: Decimal, high: Decimal, low: Decimal) -> SymbolDetails {
        SymbolDetails {
            symbol: symbol.to_string(),
            info: OhlcSample {
                open,
                high,
                low,
                close: open,
            },
        }
    }

    #[test]
    fn test_fractional_digits() {
        assert_eq!(fractional_digits(dec!(1.2345)), 4);
        assert_eq!(fractional_digits(dec!(1.2)), 1);
        assert_eq!(fractional_digits(dec!(1)), 0);
        // Trailing zeros do not count as precision
        assert_eq!(fractional_digits(dec!(1.2300)), 2);
    }

    #[tokio::test]
    async fn test_precision_is_max_across_open_high_low() {
        let venue = ListingVenue {
            markets: vec![listing("BTCUSD", dec!(1.2345), dec!(1.2), dec!(1))],
        };

        let precision = resolve_symbol_precision(&venue, "BTCUSD").await.unwrap();
        assert_eq!(precision.precision, 4);
        assert_eq!(precision.tick_increment, dec!(0.0001));
    }

    #[tokio::test]
    async fn test_integer_sample_yields_unit_tick() {
        let venue = ListingVenue {
            markets: vec![listing("BTCUSD", dec!(42000), dec!(43000), dec!(41000))],
        };

        let precision = resolve_symbol_precision(&venue, "BTCUSD").await.unwrap();
        assert_eq!(precision.precision, 0);
        assert_eq!(precision.tick_increment, dec!(1));
    }

    #[tokio::test]
    async fn test_missing_symbol_is_fatal() {
        let venue = ListingVenue {
            markets: vec![listing("ETHUSD", dec!(3000.5), dec!(3001), dec!(2999))],
        };

        let result = resolve_symbol_precision(&venue, "BTCUSD").await;
        assert!(matches!(result, Err(GatewayError::SymbolNotFound(_))));
    }
}
