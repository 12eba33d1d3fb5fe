//! Exchange rate state for the session.

use serde::{Deserialize, Serialize};

use crate::domain::models::event::Currency;

/// The session's conversion rates.
///
/// `eur_to_usd` is always re-derived as `eur_to_cop / usd_to_cop` whenever
/// both COP rates are known and positive; it is never entered directly.
/// Rates persist across trip replacement within a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRates {
    pub usd_to_cop: f64,
    pub eur_to_cop: f64,
    pub eur_to_usd: f64,
}

impl Default for ConversionRates {
    fn default() -> Self {
        Self {
            usd_to_cop: 4071.0,
            eur_to_cop: 4729.0,
            eur_to_usd: 0.86,
        }
    }
}

impl ConversionRates {
    /// Apply manually entered COP rates. A `None` or non-positive value
    /// leaves the corresponding rate unchanged (last known good retained);
    /// the EUR/USD cross rate is re-derived when both COP rates are valid.
    pub fn set_manual(&mut self, usd_cop: Option<f64>, eur_cop: Option<f64>) {
        if let Some(rate) = usd_cop.filter(|r| *r > 0.0) {
            self.usd_to_cop = rate;
        }
        if let Some(rate) = eur_cop.filter(|r| *r > 0.0) {
            self.eur_to_cop = rate;
        }
        self.rederive_cross_rate();
    }

    /// Apply a freshly fetched COP rate for one currency. Used by the
    /// refresh path, where each currency succeeds or fails independently.
    pub fn apply_cop_rate(&mut self, currency: Currency, rate: f64) {
        match currency {
            Currency::Usd => self.usd_to_cop = rate,
            Currency::Eur => self.eur_to_cop = rate,
            // COP is the quote side of both stored rates; nothing to apply
            Currency::Cop => {}
        }
        self.rederive_cross_rate();
    }

    fn rederive_cross_rate(&mut self) {
        if self.usd_to_cop > 0.0 && self.eur_to_cop > 0.0 {
            self.eur_to_usd = self.eur_to_cop / self.usd_to_cop;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rates = ConversionRates::default();
        assert_eq!(rates.usd_to_cop, 4071.0);
        assert_eq!(rates.eur_to_cop, 4729.0);
        assert_eq!(rates.eur_to_usd, 0.86);
    }

    #[test]
    fn test_set_manual_rederives_cross_rate() {
        let mut rates = ConversionRates::default();
        rates.set_manual(Some(4000.0), Some(4400.0));

        assert_eq!(rates.usd_to_cop, 4000.0);
        assert_eq!(rates.eur_to_cop, 4400.0);
        assert!((rates.eur_to_usd - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_set_manual_ignores_non_positive_values() {
        let mut rates = ConversionRates::default();
        rates.set_manual(Some(0.0), Some(-5.0));

        // Last known good retained
        assert_eq!(rates.usd_to_cop, 4071.0);
        assert_eq!(rates.eur_to_cop, 4729.0);
    }

    #[test]
    fn test_partial_manual_update_still_rederives() {
        let mut rates = ConversionRates::default();
        rates.set_manual(Some(4729.0), None);

        assert_eq!(rates.usd_to_cop, 4729.0);
        assert!((rates.eur_to_usd - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_apply_cop_rate_per_currency() {
        let mut rates = ConversionRates::default();
        rates.apply_cop_rate(Currency::Usd, 3900.0);
        assert_eq!(rates.usd_to_cop, 3900.0);
        assert!((rates.eur_to_usd - 4729.0 / 3900.0).abs() < 1e-12);

        rates.apply_cop_rate(Currency::Eur, 4300.0);
        assert_eq!(rates.eur_to_cop, 4300.0);
        assert!((rates.eur_to_usd - 4300.0 / 3900.0).abs() < 1e-12);
    }
}
