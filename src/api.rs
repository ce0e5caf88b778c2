use crate::date::{deserialize_reference_date, query_date};
use crate::error::Error;
use jiff::civil::Date;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

pub const DAILY_RATES_URL: &str =
    "https://tassidicambio.bancaditalia.it/terzevalute-wf-web/rest/v1.0/dailyRates";

/// Query for the rates of a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    pub reference_date: Date,
    pub currency: String,
    /// Left out of the query when empty, so the service applies its own default.
    pub base_currency: String,
}

impl QueryParameters {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("referenceDate", query_date(self.reference_date)),
            ("currencyIsoCode", self.currency.clone()),
        ];
        if !self.base_currency.is_empty() {
            pairs.push(("baseCurrencyIsoCode", self.base_currency.clone()));
        }
        pairs
    }
}

#[derive(Debug, Deserialize)]
pub struct DailyRates {
    #[serde(default)]
    pub rates: Vec<CurrencyRate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    pub iso_code: String,
    /// Kept as text so the value is printed exactly as published
    pub avg_rate: String,
    #[serde(deserialize_with = "deserialize_reference_date")]
    pub reference_date: Date,
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Issues a GET with the given query and hands back whatever the server answered.
///
/// Non-2xx statuses are not errors at this level, only transport failures are.
pub trait Transport {
    fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<HttpResponse, Error>;
}

/// Blocking transport over a single reusable `ureq` agent.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent: Agent = Agent::config_builder()
            // 400 carries the service's error text in the body
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .into();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<HttpResponse, Error> {
        let request = query.iter().fold(
            self.agent.get(url).header("Accept", "application/json"),
            |request, (name, value)| request.query(*name, value),
        );

        let mut resp = request.call()?;
        let status = resp.status().as_u16();
        let body = resp.body_mut().read_to_string()?;
        Ok(HttpResponse { status, body })
    }
}

/// Fetch the published rates of `currency` against `base_currency` for one day.
pub fn fetch_daily_rates<T: Transport + ?Sized>(
    transport: &T,
    date: Date,
    currency: &str,
    base_currency: &str,
) -> Result<DailyRates, Error> {
    let params = QueryParameters {
        reference_date: date,
        currency: currency.to_string(),
        base_currency: base_currency.to_string(),
    };
    debug!(%date, currency, base_currency, "requesting daily rates");

    let resp = transport.get(DAILY_RATES_URL, &params.pairs())?;
    if !resp.is_success() {
        let message = match resp.body.trim() {
            "" => "empty response body".to_string(),
            text => text.to_string(),
        };
        return Err(Error::Api {
            status: resp.status,
            message,
        });
    }

    let rates: DailyRates = serde_json::from_str(&resp.body)?;
    debug!(%date, count = rates.rates.len(), "received daily rates");
    Ok(rates)
}
