//! Periodic tick sources for the sampling and display timers.
//!
//! Runs in a dedicated thread using `edge-executor` for cooperative
//! scheduling and `async-io-mini` for reactor-driven timers.  Two tasks:
//!
//! 1. **Sampling**: posts `SampleTick` every committed interval.  A new
//!    period arriving on the re-arm signal restarts the wait from that
//!    moment.
//! 2. **Display**: posts `DisplayTick` every refresh period, scheduled
//!    against absolute deadlines so the display clock does not drift.
//!
//! ```text
//!  ┌──────────────────────────────────────────────┐
//!  │  Ticker thread                               │
//!  │  ┌────────────────────────────────────────┐  │
//!  │  │  edge_executor::LocalExecutor          │  │
//!  │  │  ┌────────────────┐  ┌──────────────┐  │  │
//!  │  │  │ Sampling  ⏱    │  │ Display  ⏱   │  │  │
//!  │  │  │ + re-arm signal│  │ 1 s          │  │  │
//!  │  │  └────────────────┘  └──────────────┘  │  │
//!  │  └────────────────────────────────────────┘  │
//!  └──────────────────────────────────────────────┘
//!                        │ try_send
//!                        ▼
//!                   EventQueue
//! ```

use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::info;

use crate::events::{EVENTS, Event, EventQueue};

/// Carries a new sampling period from the main loop to the ticker thread.
pub type RearmSignal = Signal<CriticalSectionRawMutex, Duration>;

/// Process-wide re-arm signal for the sampling ticker.
pub static SAMPLING_REARM: RearmSignal = Signal::new();

/// Restart the process-wide sampling ticker with `period`, counted from now.
pub fn rearm_sampling(period: Duration) {
    SAMPLING_REARM.signal(period);
}

enum Wake {
    Elapsed,
    Rearm(Duration),
}

async fn sampling_loop(queue: &'static EventQueue, rearm: &'static RearmSignal, mut period: Duration) {
    loop {
        let wake = futures_lite::future::or(
            async {
                async_io_mini::Timer::after(period).await;
                Wake::Elapsed
            },
            async { Wake::Rearm(rearm.wait().await) },
        )
        .await;

        match wake {
            Wake::Elapsed => {
                queue.post(Event::SampleTick);
            }
            Wake::Rearm(next) => {
                info!("ticker: sampling re-armed at {:?}", next);
                period = next;
            }
        }
    }
}

async fn display_loop(queue: &'static EventQueue, period: Duration) {
    let mut deadline = Instant::now() + period;
    loop {
        let wait = deadline.saturating_duration_since(Instant::now());
        async_io_mini::Timer::after(wait).await;
        queue.post(Event::DisplayTick);
        deadline += period;
    }
}

/// Tick periods for [`spawn_on`].
#[derive(Debug, Clone, Copy)]
pub struct TickerConfig {
    pub sampling: Duration,
    pub display: Duration,
}

/// Start both tickers on the process-wide queue and re-arm signal.
pub fn spawn(config: TickerConfig) -> std::io::Result<JoinHandle<()>> {
    spawn_on(&EVENTS, &SAMPLING_REARM, config)
}

/// Start both tickers in a dedicated thread, posting into `queue`.
pub fn spawn_on(
    queue: &'static EventQueue,
    rearm: &'static RearmSignal,
    config: TickerConfig,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("ticker".into())
        .spawn(move || {
            let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();
            executor
                .spawn(sampling_loop(queue, rearm, config.sampling))
                .detach();
            executor.spawn(display_loop(queue, config.display)).detach();

            info!(
                "ticker: sampling every {:?}, display every {:?}",
                config.sampling, config.display
            );
            futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
        })
}
