//! Watch command implementation

use crate::cli::output::{format_board, format_board_json};
use crate::cli::{BoardArgs, WatchArgs};
use crate::config::{LogFormat, TrainboardConfig};
use crate::scheduler::{BoardState, Poller};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &BoardArgs,
) -> Result<TrainboardConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        TrainboardConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        TrainboardConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(ref station) = args.station {
        config.station = station.clone();
    }
    if let Some(ref url) = args.feed_url {
        config.feed.url = url.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Initialize tracing based on configuration
///
/// Logs go to stderr so the board on stdout stays clean.
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Build filter directives using helper function
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
pub(crate) async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => return,
    }

    cancel_token.cancel();
}

/// Whether `next` differs from the last printed board in anything visible.
pub fn should_redraw(previous: Option<&BoardState>, next: &BoardState) -> bool {
    let Some(previous) = previous else {
        return true;
    };

    if previous.freshness.verdict != next.freshness.verdict
        || previous.freshness.stale_cause != next.freshness.stale_cause
    {
        return true;
    }

    match (&previous.snapshot, &next.snapshot) {
        (Some(a), Some(b)) => !a.same_arrivals(b),
        (None, None) => false,
        _ => true,
    }
}

/// Main watch command handler
pub async fn run_watch(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load and merge configuration
    let mut config = load_config_with_overrides(&args.board)?;
    if let Some(ref listen) = args.metrics_listen {
        config.metrics.listen = Some(listen.clone());
    }

    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!(station = %config.station, feed = %config.feed.url, "Starting trainboard");
    tracing::debug!(?config, "Loaded configuration");

    // 3. Metrics exporter (if configured)
    if let Some(addr) = config.metrics_listen()? {
        crate::metrics::setup_metrics(addr)?;
        tracing::info!(addr = %addr, "Prometheus metrics listening");
    }

    // 4. Start the poller
    let poller = Poller::from_config(&config)?;
    let mut board_rx = poller.subscribe();
    let cancel_token = CancellationToken::new();
    let poller_handle = poller.start(cancel_token.clone());

    tokio::spawn(shutdown_signal(cancel_token.clone()));

    // 5. Print the board whenever a cycle publishes
    let mut last_printed: Option<BoardState> = None;
    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            changed = board_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let board = board_rx.borrow_and_update().clone();

                if !config.display.redraw_unchanged
                    && !should_redraw(last_printed.as_ref(), &board)
                {
                    tracing::trace!(cycles = board.cycles, "Board unchanged, not redrawing");
                    continue;
                }

                if args.board.json {
                    println!("{}", serde_json::to_string(&board)?);
                } else {
                    println!(
                        "{}\n",
                        format_board(
                            &board,
                            &config.station,
                            config.display.max_cards,
                            chrono::Utc::now()
                        )
                    );
                }
                last_printed = Some(board);
            }
        }
    }

    // 6. Cleanup
    tracing::info!("Waiting for poller to stop");
    poller_handle.await?;

    tracing::info!("trainboard stopped");
    Ok(())
}

/// `once` command handler: one cycle, print, exit non-zero if the poll failed.
pub async fn run_once(args: crate::cli::OnceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args.board)?;
    config.validate()?;
    init_tracing(&config.logging)?;

    let mut poller = Poller::from_config(&config)?;
    let board_rx = poller.subscribe();
    let report = poller.poll_once().await;
    let board = board_rx.borrow().clone();

    if args.board.json {
        println!("{}", format_board_json(&board)?);
    } else {
        println!(
            "{}",
            format_board(
                &board,
                &config.station,
                config.display.max_cards,
                chrono::Utc::now()
            )
        );
    }

    if !report.outcome.ok {
        let reason = report.outcome.reason.unwrap_or_default();
        return Err(format!("poll failed: {}", reason).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::{ArrivalEntry, FeedSnapshot};
    use crate::freshness::{StaleCause, Verdict};
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn board_args(config: PathBuf) -> BoardArgs {
        BoardArgs {
            config,
            station: None,
            feed_url: None,
            log_level: None,
            json: false,
        }
    }

    fn board_with(arrivals: Vec<ArrivalEntry>, verdict: Verdict) -> BoardState {
        let now = chrono::Utc::now();
        let mut board = BoardState {
            snapshot: Some(Arc::new(FeedSnapshot {
                station: "HOB".to_string(),
                arrivals,
                last_updated: now,
                fetched_at: now,
            })),
            ..Default::default()
        };
        board.freshness.verdict = verdict;
        board.freshness.stale_cause = match verdict {
            Verdict::Live => None,
            Verdict::Stale => Some(StaleCause::FailureThreshold),
        };
        board
    }

    fn wtc(seconds: i64) -> ArrivalEntry {
        ArrivalEntry::new("WTC", "World Trade Center", "ToNY", seconds, "", vec![], None)
    }

    #[test]
    fn test_watch_config_loading() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "station = \"JSQ\"\n[polling]\nbaseline_seconds = 20").unwrap();

        let config = load_config_with_overrides(&board_args(temp.path().to_path_buf())).unwrap();
        assert_eq!(config.polling.baseline_seconds, 20);
    }

    #[test]
    fn test_watch_cli_overrides_config() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[feed]\nurl = \"http://from-file/feed.json\"").unwrap();

        let mut args = board_args(temp.path().to_path_buf());
        args.feed_url = Some("http://from-cli/feed.json".to_string());

        let config = load_config_with_overrides(&args).unwrap();
        assert_eq!(config.feed.url, "http://from-cli/feed.json"); // CLI wins
    }

    #[test]
    fn test_watch_works_without_config_file() {
        let config =
            load_config_with_overrides(&board_args(PathBuf::from("nonexistent.toml"))).unwrap();
        assert_eq!(config.feed.timeout_seconds, 5); // Default
    }

    #[test]
    fn test_should_redraw_first_board() {
        assert!(should_redraw(None, &BoardState::default()));
    }

    #[test]
    fn test_should_redraw_skips_identical_board() {
        let a = board_with(vec![wtc(120)], Verdict::Live);
        let mut b = board_with(vec![wtc(120)], Verdict::Live);
        b.cycles = 7;
        assert!(!should_redraw(Some(&a), &b));
    }

    #[test]
    fn test_should_redraw_on_new_arrivals_or_verdict() {
        let a = board_with(vec![wtc(120)], Verdict::Live);
        assert!(should_redraw(Some(&a), &board_with(vec![wtc(60)], Verdict::Live)));
        assert!(should_redraw(Some(&a), &board_with(vec![wtc(120)], Verdict::Stale)));
    }

    #[tokio::test]
    async fn test_shutdown_signal_returns_when_cancelled() {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(shutdown_signal(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();

        let result = tokio::time::timeout(Duration::from_secs(1), handle).await;
        assert!(result.is_ok());
    }
}
