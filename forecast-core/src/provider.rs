use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, str::FromStr, sync::Arc, time::Duration};
use tracing::{debug, info, warn};

use crate::{
    error::FetchError,
    mock::{DEFAULT_DAYS, generate_mock},
    model::ForecastRecord,
    random::{RandomSource, ThreadRandom},
    transport::{ForecastTransport, TransportResponse},
};

pub const DEFAULT_ENDPOINT: &str = "weatherforecast";
pub const DEFAULT_COMPONENT_NAME: &str = "ForecastService";
pub const DEFAULT_LOCAL_DELAY: Duration = Duration::from_millis(500);

/// Whether the provider talks to the network at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    #[default]
    Remote,
    Local,
}

impl ProviderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderMode::Remote => "remote",
            ProviderMode::Local => "local",
        }
    }

    pub const fn all() -> &'static [ProviderMode] {
        &[ProviderMode::Remote, ProviderMode::Local]
    }
}

impl std::fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "remote" => Ok(ProviderMode::Remote),
            "local" => Ok(ProviderMode::Local),
            _ => Err(anyhow::anyhow!("Unknown mode '{value}'. Supported modes: remote, local.")),
        }
    }
}

impl FromStr for ProviderMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderMode::try_from(s)
    }
}

/// Where the records of a forecast came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastSource {
    Remote,
    Mock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastOutcome {
    pub records: Vec<ForecastRecord>,
    pub source: ForecastSource,
}

/// Anything that can hand a view a forecast. Never fails.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn get_forecast(&self) -> Vec<ForecastRecord>;
}

/// Fetches from a remote endpoint and degrades to mock data on any error.
#[derive(Debug, Clone)]
pub struct ForecastService {
    name: String,
    mode: ProviderMode,
    endpoint: String,
    days: usize,
    local_delay: Duration,
    transport: Arc<dyn ForecastTransport>,
    rng: Arc<dyn RandomSource>,
}

impl ForecastService {
    pub fn new(transport: Arc<dyn ForecastTransport>) -> Self {
        Self {
            name: DEFAULT_COMPONENT_NAME.to_string(),
            mode: ProviderMode::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            days: DEFAULT_DAYS,
            local_delay: DEFAULT_LOCAL_DELAY,
            transport,
            rng: Arc::new(ThreadRandom),
        }
    }

    /// Component name attached to every log line.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_mode(mut self, mode: ProviderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Number of mock records produced in local mode and on fallback.
    pub fn with_days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    pub fn with_local_delay(mut self, delay: Duration) -> Self {
        self.local_delay = delay;
        self
    }

    pub fn with_random(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> ProviderMode {
        self.mode
    }

    /// Produce a forecast and report where it came from.
    pub async fn fetch(&self) -> ForecastOutcome {
        match self.mode {
            ProviderMode::Local => {
                debug!(
                    component = %self.name,
                    delay_ms = self.local_delay.as_millis() as u64,
                    "local mode, synthesizing forecast"
                );
                tokio::time::sleep(self.local_delay).await;
                self.mock_outcome()
            }
            ProviderMode::Remote => match self.fetch_remote().await {
                Ok(records) => ForecastOutcome { records, source: ForecastSource::Remote },
                Err(err) => {
                    warn!(
                        component = %self.name,
                        category = err.category(),
                        error = %err,
                        "forecast request failed"
                    );
                    debug!(component = %self.name, details = %err.chain(), "forecast request error chain");
                    info!(component = %self.name, "falling back to mock data");
                    self.mock_outcome()
                }
            },
        }
    }

    async fn fetch_remote(&self) -> Result<Vec<ForecastRecord>, FetchError> {
        info!(
            component = %self.name,
            base_address = %self.transport.base_address(),
            endpoint = %self.endpoint,
            "requesting forecast"
        );

        let response = self.transport.get(&self.endpoint).await?;
        decode_forecast(response)
    }

    fn mock_outcome(&self) -> ForecastOutcome {
        ForecastOutcome {
            records: generate_mock(self.days, self.rng.as_ref()),
            source: ForecastSource::Mock,
        }
    }
}

#[async_trait]
impl ForecastProvider for ForecastService {
    async fn get_forecast(&self) -> Vec<ForecastRecord> {
        self.fetch().await.records
    }
}

/// Turn a raw response into records. A JSON `null` body is an empty forecast.
pub fn decode_forecast(response: TransportResponse) -> Result<Vec<ForecastRecord>, FetchError> {
    if !response.is_success() {
        return Err(FetchError::Status {
            status: response.status,
            body: truncate_body(&response.body),
        });
    }

    let parsed: Option<Vec<ForecastRecord>> = serde_json::from_str(&response.body)?;
    Ok(parsed.unwrap_or_default())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mock::{MAX_TEMPERATURE_C_EXCLUSIVE, MIN_TEMPERATURE_C, SUMMARIES},
        random::SeededRandom,
    };
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    enum Reply {
        Respond(u16, &'static str),
        Refuse,
    }

    #[derive(Debug)]
    struct StubTransport {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubTransport {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self { reply, calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ForecastTransport for StubTransport {
        fn base_address(&self) -> String {
            "http://stub.test/".to_string()
        }

        async fn get(&self, endpoint: &str) -> Result<TransportResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(endpoint, DEFAULT_ENDPOINT);
            match self.reply {
                Reply::Respond(status, body) => Ok(TransportResponse::new(status, body)),
                Reply::Refuse => Err(FetchError::Transport("connection refused".into())),
            }
        }
    }

    fn assert_mock(records: &[ForecastRecord], expected_len: usize) {
        assert_eq!(records.len(), expected_len);
        assert!(records.windows(2).all(|w| w[0].date < w[1].date));
        for r in records {
            assert!((MIN_TEMPERATURE_C..MAX_TEMPERATURE_C_EXCLUSIVE).contains(&r.temperature_c));
            assert!(SUMMARIES.contains(&r.summary.as_deref().unwrap()));
        }
    }

    #[test]
    fn provider_mode_as_str_roundtrip() {
        for mode in ProviderMode::all() {
            let parsed = ProviderMode::try_from(mode.as_str()).expect("roundtrip should succeed");
            assert_eq!(*mode, parsed);
        }
    }

    #[test]
    fn provider_mode_parse_is_case_insensitive() {
        assert_eq!("LOCAL".parse::<ProviderMode>().unwrap(), ProviderMode::Local);
    }

    #[test]
    fn unknown_mode_error() {
        let err = ProviderMode::try_from("offline").unwrap_err();
        assert!(err.to_string().contains("Unknown mode"));
    }

    #[tokio::test]
    async fn remote_records_are_returned_as_is() {
        let body = r#"[
            {"date":"2025-06-02","temperatureC":80,"summary":"Hot"},
            {"date":"2025-06-01","temperatureC":-40,"summary":""}
        ]"#;
        let transport = StubTransport::new(Reply::Respond(200, body));
        let service = ForecastService::new(transport.clone());

        let outcome = service.fetch().await;

        assert_eq!(outcome.source, ForecastSource::Remote);
        assert_eq!(
            outcome.records,
            vec![
                ForecastRecord::new(
                    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                    80,
                    Some("Hot".to_string())
                ),
                ForecastRecord::new(
                    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                    -40,
                    Some(String::new())
                ),
            ]
        );
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn empty_array_is_empty_not_mock() {
        let service = ForecastService::new(StubTransport::new(Reply::Respond(200, "[]")));

        let outcome = service.fetch().await;

        assert_eq!(outcome.source, ForecastSource::Remote);
        assert!(outcome.records.is_empty());
    }

    #[tokio::test]
    async fn null_body_is_empty_not_mock() {
        let service = ForecastService::new(StubTransport::new(Reply::Respond(200, "null")));

        let outcome = service.fetch().await;

        assert_eq!(outcome.source, ForecastSource::Remote);
        assert!(outcome.records.is_empty());
    }

    #[tokio::test]
    async fn error_status_falls_back_to_mock() {
        let service =
            ForecastService::new(StubTransport::new(Reply::Respond(500, "boom")));

        let outcome = service.fetch().await;

        assert_eq!(outcome.source, ForecastSource::Mock);
        assert_mock(&outcome.records, 5);
    }

    #[tokio::test]
    async fn transport_failure_falls_back_to_mock() {
        let service = ForecastService::new(StubTransport::new(Reply::Refuse));

        let records = service.get_forecast().await;

        assert_mock(&records, 5);
    }

    #[tokio::test]
    async fn malformed_body_falls_back_to_mock() {
        for body in [r#"{"not":"an array"}"#, "<html>", ""] {
            let service = ForecastService::new(StubTransport::new(Reply::Respond(200, body)));

            let outcome = service.fetch().await;

            assert_eq!(outcome.source, ForecastSource::Mock, "body: {body:?}");
            assert_mock(&outcome.records, 5);
        }
    }

    #[tokio::test]
    async fn fallback_honors_configured_days() {
        let service = ForecastService::new(StubTransport::new(Reply::Refuse))
            .with_days(3)
            .with_random(Arc::new(SeededRandom::new(1)));

        assert_mock(&service.get_forecast().await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn local_mode_never_touches_transport() {
        let transport = StubTransport::new(Reply::Refuse);
        let service = ForecastService::new(transport.clone()).with_mode(ProviderMode::Local);

        let started = tokio::time::Instant::now();
        let outcome = service.fetch().await;

        assert!(started.elapsed() >= DEFAULT_LOCAL_DELAY);
        assert_eq!(outcome.source, ForecastSource::Mock);
        assert_mock(&outcome.records, 5);
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn decode_reports_status_and_truncates_body() {
        let body = "x".repeat(500);
        let err = decode_forecast(TransportResponse::new(404, body)).unwrap_err();

        assert_eq!(err.category(), "status");
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.ends_with("..."));
        assert!(msg.len() < 300);
    }

    #[test]
    fn builder_overrides_name_and_mode() {
        let service = ForecastService::new(StubTransport::new(Reply::Refuse))
            .with_name("ShellForecast")
            .with_mode(ProviderMode::Local);

        assert_eq!(service.name(), "ShellForecast");
        assert_eq!(service.mode(), ProviderMode::Local);
    }
}
