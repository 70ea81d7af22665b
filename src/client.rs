//! HTTP client for the pipeline backend's run API.
//!
//! Two endpoints exist:
//!
//! - `GET /api/runs` — all runs, in whatever order the server chose
//! - `GET /api/runs/{id}` — one run plus its log lines
//!
//! The [`RunsApi`] trait is the seam between the views and the transport:
//! the monitor and the one-shot commands talk to `dyn RunsApi`, which lets
//! tests substitute a stub backend without a network.

use crate::error::{Result, RunwatchError};
use crate::model::{Run, RunDetail};
use std::time::Duration;

/// Read access to the backend's run collection.
pub trait RunsApi: Send + Sync {
    /// Fetch the collection of all runs.
    fn list_runs(&self) -> Result<Vec<Run>>;

    /// Fetch one run's summary and logs.
    fn run_detail(&self, id: i64) -> Result<RunDetail>;
}

/// `RunsApi` implementation speaking HTTP to a live backend.
pub struct HttpClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

/// Connect timeout for the backend. Requests themselves run with the
/// transport default; failed connections should not hang the spinner.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

impl HttpClient {
    /// Create a client for the backend at `base_url`
    /// (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
        }
    }

    /// Issue a GET and return the response body.
    ///
    /// Any non-2xx status maps to [`RunwatchError::Status`] carrying the
    /// numeric code; the body of error responses is discarded.
    fn get(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RunwatchError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}

impl RunsApi for HttpClient {
    fn list_runs(&self) -> Result<Vec<Run>> {
        let body = self.get("/api/runs")?;
        decode_runs(&body)
    }

    fn run_detail(&self, id: i64) -> Result<RunDetail> {
        let body = self.get(&format!("/api/runs/{id}"))?;
        decode_detail(&body)
    }
}

/// Decode the run-list body.
///
/// The backend encodes its nil slice as `null` when no runs exist, and an
/// empty body is possible too; both decode to an empty list rather than an
/// error.
pub(crate) fn decode_runs(body: &str) -> Result<Vec<Run>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let runs: Option<Vec<Run>> = serde_json::from_str(body)?;
    Ok(runs.unwrap_or_default())
}

/// Decode the run-detail body (`{ "run": ..., "logs": [...] }`).
pub(crate) fn decode_detail(body: &str) -> Result<RunDetail> {
    Ok(serde_json::from_str(body)?)
}
