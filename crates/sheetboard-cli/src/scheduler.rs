//! The event loop: interval ticks, stdin commands, shutdown.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use sheetboard_sync::RowSource;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{info, warn};

use crate::commands::{HELP, Input, parse_line};
use crate::dashboard::{Command, Dashboard, Publisher};

/// Fetch on start and every `refresh` after, interleaving stdin commands,
/// until `quit`, or `shutdown` resolves.
///
/// Fetches are awaited inline, so at most one is ever in flight. A tick that
/// comes due during a slow fetch is delayed, not stacked. `shutdown` is
/// also watched while a fetch is running.
pub async fn run<S, P, R, F>(
    dashboard: &mut Dashboard<S, P>,
    refresh: Duration,
    input: R,
    shutdown: F,
) -> anyhow::Result<()>
where
    S: RowSource,
    P: Publisher,
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut lines = input.lines();
    let mut input_open = true;
    tokio::pin!(shutdown);

    info!(refresh_ms = refresh.as_millis() as u64, "dashboard running");

    // The on-load fetch; the interval starts counting after it.
    if !dispatch_until(dashboard, Command::Tick, &mut shutdown).await {
        return Ok(());
    }
    let mut ticker = interval_at(Instant::now() + refresh, refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!("shutdown requested");
                break;
            }
            _ = ticker.tick() => {
                if !dispatch_until(dashboard, Command::Tick, &mut shutdown).await {
                    break;
                }
            }
            line = lines.next_line(), if input_open => match line {
                Ok(Some(line)) => match parse_line(&line) {
                    Ok(Input::Dispatch(cmd)) => {
                        if cmd == Command::Tick {
                            // Manual refresh restarts the countdown.
                            ticker.reset();
                        }
                        if !dispatch_until(dashboard, cmd, &mut shutdown).await {
                            break;
                        }
                    }
                    Ok(Input::Help) => eprintln!("{HELP}"),
                    Ok(Input::Quit) => break,
                    Ok(Input::Nothing) => {}
                    Err(e) => eprintln!("{e}"),
                },
                Ok(None) => {
                    // Input closed (e.g. piped or detached); keep polling.
                    input_open = false;
                }
                Err(e) => {
                    warn!(error = %e, "stdin read failed; commands disabled");
                    input_open = false;
                }
            },
        }
    }

    Ok(())
}

/// Dispatch `cmd` unless `shutdown` resolves first. Returns `false` on
/// shutdown; the interrupted command is dropped.
async fn dispatch_until<S, P, F>(
    dashboard: &mut Dashboard<S, P>,
    cmd: Command,
    shutdown: &mut Pin<&mut F>,
) -> bool
where
    S: RowSource,
    P: Publisher,
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;

        _ = shutdown.as_mut() => {
            info!("shutdown requested");
            false
        }
        _ = dashboard.dispatch(cmd) => true,
    }
}

/// Resolve when `signal` fires. If the handler cannot be installed the
/// error is logged and this never resolves, leaving `quit` as the way out.
pub async fn wait_for_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "cannot listen for Ctrl-C; type `quit` to stop");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::tests::{RecordingPublisher, ScriptedSource, sample_rows};
    use crate::state::{AppState, FetchPhase};
    use async_trait::async_trait;
    use sheetboard_core::FilterSet;
    use sheetboard_sync::{Row, SyncError};

    /// A sheet request that never completes.
    struct StalledSource;

    #[async_trait]
    impl RowSource for StalledSource {
        async fn fetch_rows(&self) -> Result<Vec<Row>, SyncError> {
            std::future::pending().await
        }
    }

    fn dashboard(replies: usize) -> Dashboard<ScriptedSource, RecordingPublisher> {
        Dashboard::new(
            AppState::new(FilterSet::default()),
            ScriptedSource::new((0..replies).map(|_| Ok(sample_rows())).collect()),
            RecordingPublisher::default(),
        )
    }

    #[tokio::test]
    async fn fetches_on_start_then_applies_commands() {
        let mut d = dashboard(1);
        let input: &[u8] = b"type Task\n\nquit\n";
        run(&mut d, Duration::from_secs(3600), input, std::future::pending())
            .await
            .unwrap();

        assert_eq!(d.state().all().len(), 2);
        let titles: Vec<&str> = d.state().filtered().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Task B"]);
    }

    #[tokio::test]
    async fn refresh_command_fetches_again() {
        let mut d = dashboard(2);
        let input: &[u8] = b"refresh\nquit\n";
        run(&mut d, Duration::from_secs(3600), input, std::future::pending())
            .await
            .unwrap();

        // loading + result, twice
        assert_eq!(d.publisher().snapshots.len(), 4);
        assert!(d.state().banner().is_none());
    }

    #[tokio::test]
    async fn shutdown_stops_loop() {
        let mut d = dashboard(0);
        run(&mut d, Duration::from_secs(3600), tokio::io::empty(), async {})
            .await
            .unwrap();
        assert!(d.publisher().snapshots.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_repeat_on_interval() {
        let mut d = dashboard(3);
        let shutdown = tokio::time::sleep(Duration::from_millis(2_500));
        run(&mut d, Duration::from_secs(1), tokio::io::empty(), shutdown)
            .await
            .unwrap();
        // Ticks at 0s, 1s, 2s.
        assert_eq!(d.publisher().snapshots.len(), 6);
        assert_eq!(d.state().all().len(), 2);
    }

    #[tokio::test]
    async fn queued_refresh_does_not_swallow_on_load_fetch() {
        let mut d = dashboard(2);
        // Input is ready before the first poll of the loop.
        let input: &[u8] = b"refresh\nrefresh\nquit\n";
        run(&mut d, Duration::from_secs(3600), input, std::future::pending())
            .await
            .unwrap();

        // On-load fetch, then two manual refreshes (the last has no reply).
        assert_eq!(d.publisher().snapshots.len(), 6);
        assert_eq!(d.publisher().snapshots[1].titles.len(), 2);
        assert!(d.state().banner().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_interrupts_stalled_fetch() {
        let mut d = Dashboard::new(
            AppState::new(FilterSet::default()),
            StalledSource,
            RecordingPublisher::default(),
        );
        let input: &[u8] = b"clear\nquit\n";
        let shutdown = tokio::time::sleep(Duration::from_secs(1));

        let finished = tokio::time::timeout(
            Duration::from_secs(600),
            run(&mut d, Duration::from_secs(30), input, shutdown),
        )
        .await;

        assert!(finished.is_ok());
        // Only the loading page was published before shutdown.
        assert_eq!(d.publisher().snapshots.len(), 1);
        assert_eq!(d.state().phase(), FetchPhase::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_signal_handler_never_resolves() {
        let waited = tokio::time::timeout(
            Duration::from_secs(3600),
            wait_for_signal(async { Err(std::io::Error::other("no signal handler")) }),
        )
        .await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn signal_resolves_wait() {
        wait_for_signal(async { Ok(()) }).await;
    }
}
