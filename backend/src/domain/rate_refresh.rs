//! Remote exchange-rate refresh.
//!
//! The refresh collaborator fetches the COP rate for USD and EUR from a
//! public currency API. The two fetches are independent: one may fail
//! while the other succeeds, and whichever succeeds is applied. A failed
//! fetch is logged and the prior rate stays in effect.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::{info, warn};

use crate::domain::commands::rates::{RefreshRatesResult, UpdateRatesCommand};
use crate::domain::errors::DomainError;
use crate::domain::event_splitter::round2;
use crate::domain::models::{ConversionRates, Currency};

/// Collaborator that can fetch how many COP one unit of a currency buys.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_cop_rate(&self, currency: Currency) -> Result<f64, DomainError>;
}

/// [`RateProvider`] backed by the free fawazahmed0 currency API, with a
/// fallback host when the CDN copy is unavailable.
pub struct CurrencyApiProvider {
    client: reqwest::Client,
}

impl CurrencyApiProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn api_urls(code: &str) -> (String, String) {
        (
            format!(
                "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/{}.json",
                code
            ),
            format!(
                "https://latest.currency-api.pages.dev/v1/currencies/{}.json",
                code
            ),
        )
    }

    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

impl Default for CurrencyApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateProvider for CurrencyApiProvider {
    async fn fetch_cop_rate(&self, currency: Currency) -> Result<f64, DomainError> {
        let code = currency.as_str().to_lowercase();
        let (primary, fallback) = Self::api_urls(&code);

        let payload = match self.fetch_json(&primary).await {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "💱 RATES: Primary API failed for {} ({}), trying fallback",
                    code, err
                );
                self.fetch_json(&fallback).await.map_err(|err| DomainError::RateFetch {
                    currency: currency.as_str().to_string(),
                    reason: err.to_string(),
                })?
            }
        };

        payload
            .get(&code)
            .and_then(|rates| rates.get("cop"))
            .and_then(|rate| rate.as_f64())
            .ok_or_else(|| DomainError::RateFetch {
                currency: currency.as_str().to_string(),
                reason: "response is missing the COP rate".to_string(),
            })
    }
}

/// Service owning the session's conversion rates.
#[derive(Clone)]
pub struct RateService {
    rates: Arc<Mutex<ConversionRates>>,
    provider: Arc<dyn RateProvider>,
}

impl RateService {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self {
            rates: Arc::new(Mutex::new(ConversionRates::default())),
            provider,
        }
    }

    /// Snapshot of the current rates.
    pub fn current(&self) -> ConversionRates {
        *self.rates.lock().unwrap()
    }

    /// Apply manually entered rates; non-positive or missing values leave
    /// the corresponding rate unchanged.
    pub fn set_manual(&self, command: UpdateRatesCommand) -> ConversionRates {
        let mut rates = self.rates.lock().unwrap();
        rates.set_manual(command.usd_cop, command.eur_cop);
        info!(
            "💱 RATES: Manual update -> USD/COP {} | EUR/COP {} | EUR/USD {:.4}",
            rates.usd_to_cop, rates.eur_to_cop, rates.eur_to_usd
        );
        *rates
    }

    /// Wholesale replacement, used by plan import.
    pub fn replace(&self, rates: ConversionRates) {
        *self.rates.lock().unwrap() = rates;
    }

    /// Fetch fresh COP rates for USD and EUR and apply whichever fetches
    /// succeed. Fetched rates are rounded to 2 decimals before
    /// application; the cross rate is re-derived from the applied pair.
    pub async fn refresh(&self) -> RefreshRatesResult {
        let (usd_result, eur_result) = tokio::join!(
            self.provider.fetch_cop_rate(Currency::Usd),
            self.provider.fetch_cop_rate(Currency::Eur)
        );

        let mut rates = self.rates.lock().unwrap();

        let usd_cop = match usd_result {
            Ok(rate) => {
                let rate = round2(rate);
                rates.apply_cop_rate(Currency::Usd, rate);
                info!("💱 RATES: Updated USD/COP to {}", rate);
                Some(rate)
            }
            Err(err) => {
                warn!("💱 RATES: {}", err);
                None
            }
        };

        let eur_cop = match eur_result {
            Ok(rate) => {
                let rate = round2(rate);
                rates.apply_cop_rate(Currency::Eur, rate);
                info!("💱 RATES: Updated EUR/COP to {}", rate);
                Some(rate)
            }
            Err(err) => {
                warn!("💱 RATES: {}", err);
                None
            }
        };

        RefreshRatesResult {
            usd_cop,
            eur_cop,
            rates: *rates,
        }
    }
}
