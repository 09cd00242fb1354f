//! Probe runner - sends each case to the target endpoint, one at a time.

use chrono::Utc;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tracing::{debug, info, instrument, warn};

use super::case::ProbeCase;
use super::error::TransportError;
use super::result::{ProbeResult, ProbeRun, ResponseBody};
use super::scenario::ensure_unique_names;
use crate::core::{Error, Result, TargetConfig};

/// Sends probe cases to one tool-call endpoint.
///
/// Cases run strictly in order; each request completes or times out before
/// the next one starts. Requests are never retried.
#[derive(Debug)]
pub struct ProbeRunner {
    url: Url,
    timeout: Duration,
    preflight: bool,
    client: Client,
}

impl ProbeRunner {
    /// Create a runner for the configured target.
    ///
    /// Fails with a configuration error when the URL is unusable.
    pub fn new(config: TargetConfig) -> Result<Self> {
        let url = parse_target(&config.url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            url,
            timeout: config.timeout,
            preflight: config.preflight,
            client,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Run every case against the target and collect the outcomes.
    ///
    /// Per-case failures are recorded on the results; the only errors
    /// returned are raised before the first request is sent.
    #[instrument(skip_all, fields(target = %self.url, cases = cases.len()))]
    pub async fn run(&self, cases: Vec<ProbeCase>) -> Result<ProbeRun> {
        ensure_unique_names(&cases)?;

        if self.preflight {
            self.check_reachable().await?;
        }

        info!("Running {} probe cases against {}", cases.len(), self.url);

        let started_at = Utc::now();
        let mut results = Vec::with_capacity(cases.len());
        for case in cases {
            results.push(self.probe(case).await);
        }

        Ok(ProbeRun::new(self.url.as_str(), started_at, results))
    }

    /// Send a single case.
    #[instrument(skip_all, fields(case = %case.name))]
    async fn probe(&self, case: ProbeCase) -> ProbeResult {
        let start = Instant::now();

        let mut request = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = case.body() {
            debug!("Request body: {}", String::from_utf8_lossy(&body));
            request = request.body(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = TransportError::from_reqwest(&e);
                warn!("{}", error);
                return ProbeResult::failed(case, None, error, elapsed_ms(start));
            }
        };

        let status = response.status().as_u16();

        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) => {
                let error = TransportError::from_reqwest(&e);
                warn!("Status {} but {}", status, error);
                return ProbeResult::failed(case, Some(status), error, elapsed_ms(start));
            }
        };

        let body = ResponseBody::parse(raw);
        if let ResponseBody::Text { error, .. } = &body {
            warn!("Status {}: {}", status, error);
        } else {
            info!("Status {}", status);
        }

        ProbeResult::completed(case, status, body, elapsed_ms(start))
    }

    /// Open and drop one TCP connection to the target host.
    async fn check_reachable(&self) -> Result<()> {
        let host = self
            .url
            .host_str()
            .map(|h| h.trim_start_matches('[').trim_end_matches(']'))
            .ok_or_else(|| Error::config(format!("Target URL has no host: {}", self.url)))?;
        let port = self.url.port_or_known_default().unwrap_or(80);

        debug!("Preflight connect to {}:{}", host, port);

        match tokio::time::timeout(self.timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(Error::config(format!(
                "Target {}:{} is unreachable: {}",
                host, port, e
            ))),
            Err(_) => Err(Error::config(format!(
                "Target {}:{} did not accept a connection within {}ms",
                host,
                port,
                self.timeout.as_millis()
            ))),
        }
    }
}

/// Parse and validate a target URL.
fn parse_target(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::config(format!("Invalid target URL {:?}: {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "Unsupported URL scheme {:?} in {}",
            url.scheme(),
            raw
        )));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::config(format!("Target URL has no host: {}", raw)));
    }

    Ok(url)
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
