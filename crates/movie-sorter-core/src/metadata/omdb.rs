use super::{MetadataClient, MetadataRecord};
use crate::config::{AppConfig, RetryPolicy};
use crate::error::Result;
use reqwest::blocking::Client;
use serde_json::Value;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, warn};

/// How a lookup ended. Only [`LookupOutcome::Found`] carries data; the other two are
/// reported as a miss through [`MetadataClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(MetadataRecord),
    /// The service answered and has no such title. Never retried.
    NotFound,
    /// Every attempt failed at the transport or HTTP level.
    Exhausted,
}

impl LookupOutcome {
    pub fn into_record(self) -> Option<MetadataRecord> {
        match self {
            LookupOutcome::Found(record) => Some(record),
            LookupOutcome::NotFound | LookupOutcome::Exhausted => None,
        }
    }
}

enum Response {
    Found(MetadataRecord),
    Miss(String),
}

/// Blocking client for the OMDb title endpoint (`?t=<title>&apikey=<key>`).
#[derive(Debug, Clone)]
pub struct OmdbClient {
    http: Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl OmdbClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let timeout = config.request_timeout_secs.map(Duration::from_secs);
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("movie-sorter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            retry: config.retry_policy(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Look `title` up, retrying transport and HTTP failures up to the retry bound.
    pub fn lookup_outcome(&self, title: &str) -> LookupOutcome {
        for attempt in 1..=self.retry.attempts {
            match self.fetch(title) {
                Ok(Response::Found(record)) => {
                    debug!(title, attempt, "metadata found");
                    return LookupOutcome::Found(record);
                }
                Ok(Response::Miss(message)) => {
                    error!(title, error = %message, "lookup miss");
                    return LookupOutcome::NotFound;
                }
                Err(err) => {
                    warn!(title, attempt, error = %err, "lookup attempt failed");
                }
            }

            if attempt < self.retry.attempts && !self.retry.delay.is_zero() {
                thread::sleep(self.retry.delay);
            }
        }

        error!(title, "Failed to fetch details");
        LookupOutcome::Exhausted
    }

    fn fetch(&self, title: &str) -> Result<Response> {
        let body: Value = self
            .http
            .get(&self.base_url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()?
            .error_for_status()?
            .json()?;

        if body.get("Response").and_then(Value::as_str) == Some("True") {
            return Ok(Response::Found(serde_json::from_value(body)?));
        }

        let message = body
            .get("Error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        Ok(Response::Miss(message))
    }
}

impl MetadataClient for OmdbClient {
    fn lookup(&self, title: &str) -> Option<MetadataRecord> {
        self.lookup_outcome(title).into_record()
    }
}
