//! # Appliance Daemon
//!
//! The runtime control loop: consume the knob and button event streams
//! concurrently, keep the selection counter and the seven-segment
//! readout in sync, and hand selected cards to a print worker.
//!
//! ## Structure
//!
//! ```text
//!  knob stream  ─┐
//!                ├─ select! ── rotate ──> counter ──> display
//!  button stream ┘     │
//!                      └───── press ──> store lookup ──┐
//!                                                      │ bounded(1)
//!  shutdown signal ──> loop exit                       ▼
//!                                               print worker ──> printer
//! ```
//!
//! The counter lives on the dispatcher task and is only touched between
//! its suspension points, so every mutation and every snapshot read is
//! serialized without a lock. The print worker owns the printer handle
//! and runs each print on the blocking pool, so serial transmission of
//! an image never delays knob handling; the handoff channel is bounded
//! at one and a press that arrives while a print is in flight is
//! dropped with a warning instead of queued.
//!
//! ## Lifecycle
//!
//! However the loop ends — shutdown signal, dead input device, fault in
//! handling — [`run_until`] drains the print worker and then clears the
//! display exactly once before returning. Cleanup is bound to the run
//! scope, not to drop order.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, info, warn};

use crate::card::Card;
use crate::counter::RingCounter;
use crate::display::{self, SevenSegment};
use crate::error::TiradaError;
use crate::format::format_card;
use crate::input::{DeviceEvent, Direction, EventSource};
use crate::printer::{self, Printer};
use crate::store::CardStore;

/// Run the daemon until interrupted (SIGINT or SIGTERM).
///
/// Takes ownership of all capability handles; they are released when
/// this returns. The display is cleared on every exit path.
pub async fn run<K, B, S, D, P>(
    knob: K,
    button: B,
    store: S,
    display: D,
    printer: P,
) -> Result<(), TiradaError>
where
    K: EventSource,
    B: EventSource,
    S: CardStore,
    D: SevenSegment,
    P: Printer + Send + 'static,
{
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let shutdown = async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    };

    run_until(knob, button, store, display, printer, shutdown).await
}

/// Run the daemon until `shutdown` completes. Factored out of [`run`]
/// so tests can drive the exit path directly.
async fn run_until<K, B, S, D, P, F>(
    mut knob: K,
    mut button: B,
    mut store: S,
    mut display: D,
    printer: P,
    shutdown: F,
) -> Result<(), TiradaError>
where
    K: EventSource,
    B: EventSource,
    S: CardStore,
    D: SevenSegment,
    P: Printer + Send + 'static,
    F: Future<Output = ()>,
{
    let (print_tx, print_rx) = mpsc::channel::<Card>(1);
    let worker = tokio::spawn(print_worker(print_rx, printer));

    let result = event_loop(
        &mut knob,
        &mut button,
        &mut store,
        &mut display,
        &print_tx,
        shutdown,
    )
    .await;

    // Closing the handoff channel lets an in-flight print finish, then
    // ends the worker.
    drop(print_tx);
    if let Err(e) = worker.await {
        error!("print worker panicked: {e}");
    }

    let cleanup = release_display(&mut display);
    result.and(cleanup)
}

/// The dispatcher proper. Returns `Ok(())` on requested shutdown and
/// `Err` when an input stream dies.
async fn event_loop<K, B, S, D, F>(
    knob: &mut K,
    button: &mut B,
    store: &mut S,
    display: &mut D,
    print_tx: &mpsc::Sender<Card>,
    shutdown: F,
) -> Result<(), TiradaError>
where
    K: EventSource,
    B: EventSource,
    S: CardStore,
    D: SevenSegment,
    F: Future<Output = ()>,
{
    let mut counter = RingCounter::new();

    // Show the initial selection before taking any input. A display
    // that is already dead at startup is a startup failure.
    display::render(display, counter.value())?;

    tokio::pin!(shutdown);
    loop {
        let event = tokio::select! {
            () = &mut shutdown => {
                info!("shutdown requested");
                return Ok(());
            }
            event = knob.next_event() => event?,
            event = button.next_event() => event?,
        };

        handle_event(event, &mut counter, store, display, print_tx);
    }
}

/// Route one device event. Steady-state hardware and store failures are
/// logged and absorbed here; the counter is never left corrupted by a
/// failed print or display write.
fn handle_event<S, D>(
    event: DeviceEvent,
    counter: &mut RingCounter,
    store: &mut S,
    display: &mut D,
    print_tx: &mpsc::Sender<Card>,
) where
    S: CardStore,
    D: SevenSegment,
{
    match event {
        DeviceEvent::Rotate(direction) => {
            match direction {
                Direction::Clockwise => counter.increment(),
                Direction::CounterClockwise => counter.decrement(),
            }
            debug!("selection -> {}", counter.value());
            if let Err(e) = display::render(display, counter.value()) {
                warn!("display update failed: {e}");
            }
        }
        DeviceEvent::Button { pressed: true } => {
            // Snapshot at the moment of dispatch; later rotations must
            // not affect this print.
            let value = counter.value();
            match store.select_random(value) {
                Ok(Some(card)) => {
                    info!("printing '{}' (id {}) for value {value}", card.name, card.id);
                    match print_tx.try_send(card) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            warn!("print already in progress, ignoring press");
                        }
                        Err(TrySendError::Closed(_)) => {
                            warn!("print worker gone, ignoring press");
                        }
                    }
                }
                Ok(None) => warn!("no card with value {value}, nothing to print"),
                Err(e) => warn!("card lookup failed: {e}"),
            }
        }
        DeviceEvent::Button { pressed: false } => {
            debug!("button released");
        }
    }
}

/// Consume selected cards and print them on the blocking pool, one at a
/// time. Owns the printer handle for the life of the daemon.
async fn print_worker<P>(mut print_rx: mpsc::Receiver<Card>, printer: P)
where
    P: Printer + Send + 'static,
{
    let mut printer = printer;
    while let Some(card) = print_rx.recv().await {
        let ops = format_card(&card);
        let outcome = tokio::task::spawn_blocking(move || {
            let mut printer = printer;
            let result = printer::print_ops(&mut printer, &ops);
            (printer, result)
        })
        .await;

        match outcome {
            Ok((returned, Ok(()))) => {
                printer = returned;
                debug!("printed '{}'", card.name);
            }
            Ok((returned, Err(e))) => {
                printer = returned;
                warn!("print of '{}' failed: {e}", card.name);
            }
            Err(e) => {
                // The printer handle died with the panicked task; the
                // worker cannot continue without it.
                error!("print task panicked: {e}");
                return;
            }
        }
    }
}

/// The one cleanup action of the run scope: blank the display so the
/// appliance does not keep showing a stale selection after exit.
fn release_display(display: &mut impl SevenSegment) -> Result<(), TiradaError> {
    display.clear();
    display.commit()
}
