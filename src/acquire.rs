//! Result acquisition: turn a finished measurement into a stored report.
//!
//! The vendor SDK materializes its result asynchronously, so acquisition
//! is a small sequential flow with two suspension points:
//!
//! 1. query the SDK once — in-memory bytes are the fast path;
//! 2. while the result is not ready, re-query with exponential backoff
//!    (bounded by [`PollPolicy`]);
//! 3. a URL result is downloaded with a transient HTTP client into a
//!    temporary file;
//! 4. bytes or the temp file are handed to the store.
//!
//! Exhausting the polling budget yields [`VitalsError::Unavailable`],
//! a recoverable "try again" condition. Download and storage failures
//! propagate with their underlying error.
//!
//! Sleeps go through `tokio::time`, so tests drive the loop under a
//! paused clock with no real delays.

use crate::error::{Result, VitalsError};
use crate::model::StoredReport;
use crate::sdk::{MeasurementSdk, ResultPdf};
use crate::store::ReportStore;
use async_trait::async_trait;
use log::debug;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Backoff schedule for the URL poll.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub backoff: f64,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            initial_delay: Duration::from_millis(300),
            backoff: 1.25,
        }
    }
}

/// Downloads a prepared report to a temporary location.
#[async_trait]
pub trait ReportFetcher {
    async fn download(&self, url: &str) -> Result<NamedTempFile>;
}

/// reqwest-backed fetcher. The client is transient: freshly built, no
/// cache layer, bounded timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ReportFetcher for HttpFetcher {
    async fn download(&self, url: &str) -> Result<NamedTempFile> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(&bytes)?;
        tmp.flush()?;
        Ok(tmp)
    }
}

/// Obtain the finished measurement report and persist it under `title`.
pub async fn acquire_report<S: ReportStore>(
    sdk: &dyn MeasurementSdk,
    fetcher: &dyn ReportFetcher,
    store: &mut S,
    title: &str,
    policy: &PollPolicy,
) -> Result<StoredReport> {
    sdk.request_result_pdf();

    match poll_result_pdf(sdk, policy).await {
        ResultPdf::Bytes(data) => store.add_report(&data, title),
        ResultPdf::Url(url) => {
            debug!("report ready at {}, downloading", url);
            let tmp = fetcher.download(&url).await?;
            store.add_report_from_file(tmp.path(), title)
        }
        ResultPdf::NotReady => Err(VitalsError::Unavailable),
    }
}

/// Query immediately, then re-query after growing delays until the SDK
/// produces something or the attempt budget runs out.
async fn poll_result_pdf(sdk: &dyn MeasurementSdk, policy: &PollPolicy) -> ResultPdf {
    let mut result = normalize(sdk.result_pdf());
    let mut delay = policy.initial_delay;
    let mut attempts = 0;

    while matches!(result, ResultPdf::NotReady) && attempts < policy.max_attempts {
        debug!(
            "report not ready, retrying in {:?} ({}/{})",
            delay,
            attempts + 1,
            policy.max_attempts
        );
        tokio::time::sleep(delay).await;
        delay = delay.mul_f64(policy.backoff);
        attempts += 1;
        result = normalize(sdk.result_pdf());
    }

    result
}

// An empty byte payload means the SDK is still rendering
fn normalize(result: ResultPdf) -> ResultPdf {
    match result {
        ResultPdf::Bytes(data) if data.is_empty() => ResultPdf::NotReady,
        other => other,
    }
}
