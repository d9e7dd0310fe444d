//! Barcode lookup against the public food database.
//!
//! Callers only see [`LookupOutcome::Found`] or [`LookupOutcome::NotFound`]. Transport and
//! decode failures are logged as [`LookupError`] and then reported as `NotFound`, so a
//! network failure looks the same as an unknown product.

use crate::{
    config::BarcodeConfig,
    errors::{Error, Result},
    models::NutritionRecord,
};
use serde_json::Value;
use std::{future::Future, time::Duration};
use thiserror::Error as ThisError;
use tracing::{debug, info, instrument, warn};

/// Name used when the database has no product name.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// Result of a barcode lookup as seen by callers.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The product exists and was normalized
    Found(NutritionRecord),
    /// Unknown product, or the lookup failed
    NotFound,
}

/// Internal failure signal; logged, never returned from [`ProductLookup::lookup`].
#[derive(Debug, ThisError)]
pub enum LookupError {
    /// Request could not be sent or the body could not be read
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Body was not valid JSON
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Resolves a barcode to nutrition data.
pub trait ProductLookup {
    /// Looks up one barcode. Never fails; failures collapse into `NotFound`.
    fn lookup(&self, barcode: &str) -> impl Future<Output = LookupOutcome> + Send;
}

/// HTTP client for the `{base_url}/{barcode}.json` product endpoint.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    /// Builds a client with the configured timeout and user agent.
    pub fn new(config: &BarcodeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Config {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL requested for `barcode`. The barcode is inserted verbatim.
    #[must_use]
    pub fn product_url(&self, barcode: &str) -> String {
        format!("{}/{}.json", self.base_url, barcode)
    }

    async fn fetch(&self, barcode: &str) -> std::result::Result<Option<NutritionRecord>, LookupError> {
        let url = self.product_url(barcode);
        debug!("Fetching product data from {}", url);

        // The HTTP status is not checked; a non-2xx body without status = 1 reads as not found.
        let body = self.http.get(&url).send().await?.text().await?;
        let data: Value = serde_json::from_str(&body)?;

        Ok(normalize_response(barcode, &data))
    }
}

impl ProductLookup for OpenFoodFactsClient {
    #[instrument(skip(self))]
    async fn lookup(&self, barcode: &str) -> LookupOutcome {
        match self.fetch(barcode).await {
            Ok(Some(record)) => {
                info!(name = %record.name, "Product found");
                LookupOutcome::Found(record)
            }
            Ok(None) => {
                info!("Product not found in database");
                LookupOutcome::NotFound
            }
            Err(e) => {
                warn!(error = %e, "Error fetching product data");
                LookupOutcome::NotFound
            }
        }
    }
}

/// Normalizes a decoded response body.
///
/// Returns `None` unless `status` is 1 and a `product` object is present. Each nutrient
/// prefers its `_100g` field, then the plain field, then 0; zero or non-numeric values
/// count as missing.
#[must_use]
pub fn normalize_response(barcode: &str, data: &Value) -> Option<NutritionRecord> {
    let found = data
        .get("status")
        .and_then(Value::as_f64)
        .is_some_and(|s| (s - 1.0).abs() < f64::EPSILON);
    if !found {
        return None;
    }

    let product = data.get("product").filter(|p| p.is_object())?;
    let nutriments = product.get("nutriments");

    let name = product
        .get("product_name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_PRODUCT_NAME)
        .to_string();

    Some(NutritionRecord {
        name,
        calories: nutriment(nutriments, &["energy-kcal_100g", "energy-kcal"]),
        protein: nutriment(nutriments, &["proteins_100g", "proteins"]),
        carbs: nutriment(nutriments, &["carbohydrates_100g", "carbohydrates"]),
        fat: nutriment(nutriments, &["fat_100g", "fat"]),
        barcode: barcode.to_string(),
    })
}

fn nutriment(nutriments: Option<&Value>, keys: &[&str]) -> f64 {
    let Some(nutriments) = nutriments else {
        return 0.0;
    };

    keys.iter()
        .filter_map(|key| nutriments.get(*key))
        .filter_map(|value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .find(|v| v.is_finite() && *v != 0.0)
        .unwrap_or(0.0)
}
