//! BucketGate Server - HTTP facade over an S3-compatible object store.
//!
//! Serves Terraform state objects, single files, and on-demand ZIP archives
//! of template folders straight out of a MinIO or AWS S3 bucket.
//!
//! # Usage
//!
//! ```text
//! BUCKET_SERVER_ENDPOINT=localhost:9000 ACCESS_KEY_ID=... SECRET_ACCESS_KEY=... bucketgate-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LISTEN` | `0.0.0.0:8080` | Bind address |
//! | `BUCKET_SERVER_ENDPOINT` | *(required)* | Object store endpoint |
//! | `ACCESS_KEY_ID` | *(required)* | Store access key |
//! | `SECRET_ACCESS_KEY` | *(required)* | Store secret key |
//! | `REGION` | `us-east-1` | Store region |
//! | `DISABLE_SSL` | `false` | Talk plain HTTP to the store |
//! | `FORCE_PATHSTYLE_AWS_URL` | `true` | Path-style addressing (MinIO) |
//! | `STATE_BUCKET` / `STATE_KEY` | `tf-state` / `terraform.tfstate` | Terraform state location |
//! | `TEMPLATE_BUCKET` | `vm-templates` | Folder-archive bucket |
//! | `FILE_BUCKET` | `vm-files` | Single-file bucket |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bucketgate_core::{FacadeConfig, S3Store};
use bucketgate_http::FacadeService;

/// Server version reported in health check responses.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: FacadeService<S3Store>) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    // Wait for in-flight requests to complete.
    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Perform a health check by connecting to the server and requesting the
/// health endpoint.
///
/// Exits with code 0 if healthy, 1 otherwise.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request =
        format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"status\":\"running\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let config = FacadeConfig::from_env();
        let addr = config.listen.replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    let config = FacadeConfig::from_env();

    init_tracing(&config.log_level)?;

    config
        .validate()
        .map_err(|missing| anyhow::anyhow!(missing))
        .context("incomplete object store configuration")?;

    info!(
        listen = %config.listen,
        endpoint = %config.store.endpoint_url(),
        state_bucket = %config.state_bucket,
        template_bucket = %config.template_bucket,
        file_bucket = %config.file_bucket,
        version = VERSION,
        "starting BucketGate server",
    );

    let store = S3Store::new(config.store.clone());
    let service = FacadeService::new(store, config.clone());

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}
