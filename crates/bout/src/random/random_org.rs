use std::time::Duration;

use tracing::{debug, error};

use super::{RandomError, RandomSource, check_range};

pub const RANDOM_ORG_URL: &str =
    "https://www.random.org/decimal-fractions/?num=1&dec=2&col=1&format=plain&rnd=new";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RandomOrgClient {
    url: String,
    client: reqwest::Client,
}

impl RandomOrgClient {
    pub fn new(timeout: Duration) -> Result<Self, RandomError> {
        Self::with_url(RANDOM_ORG_URL, timeout)
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self, RandomError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RandomError::Source(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl RandomSource for RandomOrgClient {
    async fn next_fraction(&self) -> Result<f64, RandomError> {
        debug!("Fetching random number from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(transport_error)?;
        let body = response.text().await.map_err(transport_error)?;

        let value = parse_fraction(&body)?;
        debug!("Received random number {}", value);

        Ok(value)
    }
}

/// Parse the plain-text body random.org answers with.
pub fn parse_fraction(body: &str) -> Result<f64, RandomError> {
    let trimmed = body.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        error!("Invalid response from random.org: {}", trimmed);
        RandomError::MalformedResponse(trimmed.to_string())
    })?;

    check_range(value)
}

fn transport_error(err: reqwest::Error) -> RandomError {
    if err.is_timeout() {
        error!("Request to random.org timed out");
        RandomError::Timeout
    } else {
        error!("Request to random.org failed: {}", err);
        RandomError::Source(err.to_string())
    }
}
