//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use strainer::citation::{CitationExtractor, ExtractionStrategy};
use strainer::document::PlainTextExtractor;
use strainer::gateway::{AppState, create_router};
use strainer::jobs::{JobConfig, JobOrchestrator};
use strainer::lookup::MockCitationLookup;
use strainer::scoring::SimilarityScorer;
use strainer::summary::MockSummaryGenerator;
use strainer::verification::VerificationPolicy;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
    /// Citations the mock lookup reports as nonexistent.
    pub missing_citations: Vec<String>,
    /// Generate disagreeing summaries instead of identical ones.
    pub varying_summaries: bool,
    pub job_ttl: Duration,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            missing_citations: Vec::new(),
            varying_summaries: false,
            job_ttl: Duration::from_secs(60),
        }
    }
}

impl TestServerConfig {
    pub fn with_missing(mut self, citation: &str) -> Self {
        self.missing_citations.push(citation.to_string());
        self
    }

    pub fn with_varying_summaries(mut self) -> Self {
        self.varying_summaries = true;
        self
    }

    pub fn with_job_ttl(mut self, ttl: Duration) -> Self {
        self.job_ttl = ttl;
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn find_available_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    Ok(addr.port())
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
}

/// Spawns a server whose lookup and summary collaborators are in-process mocks.
///
/// Every citation exists unless listed in `missing_citations`; summaries are
/// identical unless `varying_summaries` is set. No pacing between citations.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let port = if config.port == 0 {
        find_available_port().await?
    } else {
        config.port
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let lookup = config
        .missing_citations
        .iter()
        .fold(MockCitationLookup::new(), |lookup, citation| {
            lookup.with_missing(citation)
        });
    let generator = if config.varying_summaries {
        MockSummaryGenerator::varying()
    } else {
        MockSummaryGenerator::consistent()
    };

    let policy = VerificationPolicy::new(
        Some(Arc::new(lookup)),
        Arc::new(generator),
        SimilarityScorer::default(),
    );
    let orchestrator = JobOrchestrator::in_memory(
        CitationExtractor::new(ExtractionStrategy::Structured),
        Arc::new(PlainTextExtractor::new()),
        policy,
        JobConfig {
            ttl: config.job_ttl,
            pacing_delay: Duration::ZERO,
        },
    );

    let app = create_router(AppState::new(orchestrator, 1024 * 1024));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
