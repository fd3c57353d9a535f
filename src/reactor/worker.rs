//! Reactor dispatch worker.
//!
//! This module delivers change notifications to the reactor on a dedicated
//! worker thread, standing in for a managed platform's trigger binding.
//! Store writes enqueue notifications using a bounded channel and never block
//! the caller; successful invocations fan out to subscriber streams.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use chrono::Utc;
use crossbeam_channel::{bounded, select, Receiver, Sender, TrySendError};

use crate::error::{DistShareError, DistShareResult};

use super::events::{DistanceUpdate, LocationWrite, SubscriptionId};
use super::invoke::{DistanceReactor, Reaction};
use super::stream::UpdateStream;

#[allow(missing_docs)]
#[derive(Debug, Clone)]
pub struct ReactorConfig {
    /// Max queued change notifications before backpressure applies.
    pub write_queue_capacity: usize,
    /// Max queued control messages (subscribe/unsubscribe).
    pub control_queue_capacity: usize,
    /// Per-subscription stream buffer capacity.
    pub stream_capacity: usize,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            write_queue_capacity: 4096,
            control_queue_capacity: 1024,
            stream_capacity: 1024,
        }
    }
}

#[derive(Debug)]
pub(crate) enum ControlMsg {
    Subscribe {
        subscription_id: SubscriptionId,
        stream_tx: Sender<DistanceUpdate>,
        reply: Sender<DistShareResult<()>>,
    },
    Unsubscribe {
        subscription_id: SubscriptionId,
    },
}

/// Reactor runtime: owns the worker thread and its queues.
///
/// Store writes enqueue a [`LocationWrite`] using non-blocking `try_send` to
/// avoid stalling callers; a dropped notification is reconciled by whichever
/// later write next triggers an invocation for the same session.
#[derive(Debug)]
pub struct ReactorRuntime {
    cfg: ReactorConfig,
    control_tx: Sender<ControlMsg>,
    write_tx: Sender<LocationWrite>,
    dropped_writes: AtomicU64,
    dropped_updates: Arc<AtomicU64>,
    failed_invocations: Arc<AtomicU64>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl ReactorRuntime {
    /// Spawn the worker thread around the given reactor.
    ///
    /// # Panics
    /// Panics if the worker thread cannot be spawned.
    #[must_use]
    pub fn new(cfg: ReactorConfig, reactor: DistanceReactor) -> Self {
        let write_queue_capacity = cfg.write_queue_capacity.max(1);
        let control_queue_capacity = cfg.control_queue_capacity.max(1);

        let (control_tx, control_rx) = bounded::<ControlMsg>(control_queue_capacity);
        let (write_tx, write_rx) = bounded::<LocationWrite>(write_queue_capacity);

        let dropped_updates = Arc::new(AtomicU64::new(0));
        let failed_invocations = Arc::new(AtomicU64::new(0));

        let thread_dropped_updates = Arc::clone(&dropped_updates);
        let thread_failed = Arc::clone(&failed_invocations);
        let join = thread::Builder::new()
            .name("distshare-reactor".to_string())
            .spawn(move || {
                worker_loop(reactor, thread_dropped_updates, thread_failed, control_rx, write_rx);
            })
            .expect("failed to spawn distshare reactor worker");

        Self {
            cfg,
            control_tx,
            write_tx,
            dropped_writes: AtomicU64::new(0),
            dropped_updates,
            failed_invocations,
            join: Mutex::new(Some(join)),
        }
    }

    /// Non-blocking notification enqueue.
    pub fn observe_write(&self, write: LocationWrite) {
        match self.write_tx.try_send(write) {
            Ok(()) => {}
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => {
                self.dropped_writes.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Register a subscriber and obtain a stream of distance updates.
    ///
    /// # Errors
    /// Returns [`DistShareError::Disconnected`] if the worker is gone.
    pub fn subscribe(&self) -> DistShareResult<UpdateStream> {
        let subscription_id = SubscriptionId::new();
        let (stream_tx, stream_rx) = bounded::<DistanceUpdate>(self.cfg.stream_capacity.max(1));
        let stream = UpdateStream::new(subscription_id, stream_rx, self.control_tx.clone());

        let (reply_tx, reply_rx) = bounded::<DistShareResult<()>>(1);
        self.control_tx
            .send(ControlMsg::Subscribe {
                subscription_id,
                stream_tx,
                reply: reply_tx,
            })
            .map_err(|_| DistShareError::Disconnected {
                path: "reactor_control".to_string(),
            })?;

        // Wait for ack (or error) and return the stream.
        reply_rx.recv().map_err(|_| DistShareError::Disconnected {
            path: "reactor_control".to_string(),
        })??;

        Ok(stream)
    }

    /// Notifications dropped because the write queue was full or closed.
    #[must_use]
    pub fn dropped_writes(&self) -> u64 {
        self.dropped_writes.load(Ordering::Relaxed)
    }

    /// Updates dropped because a subscriber stream was full.
    #[must_use]
    pub fn dropped_updates(&self) -> u64 {
        self.dropped_updates.load(Ordering::Relaxed)
    }

    /// Invocations that failed on a store read or write.
    ///
    /// The reactor implements no retry; this counter is the surface a hosting
    /// platform would watch to log or re-drive at its own discretion.
    #[must_use]
    pub fn failed_invocations(&self) -> u64 {
        self.failed_invocations.load(Ordering::Relaxed)
    }
}

impl Drop for ReactorRuntime {
    fn drop(&mut self) {
        // Close channels first so the worker can terminate, then detach.
        // This avoids deadlocking by waiting on a worker that's blocked on recv.
        let (dummy_write_tx, _) = bounded::<LocationWrite>(1);
        let old_write = std::mem::replace(&mut self.write_tx, dummy_write_tx);
        drop(old_write);

        let (dummy_control_tx, _) = bounded::<ControlMsg>(1);
        let old_control = std::mem::replace(&mut self.control_tx, dummy_control_tx);
        drop(old_control);

        if let Ok(mut guard) = self.join.lock() {
            if let Some(handle) = guard.take() {
                // Do not join here.
                //
                // Callers may keep an `UpdateStream` alive beyond the runtime
                // lifetime, and the stream holds a clone of `control_tx`.
                // Joining could wait on a worker that only exits once the last
                // sender is dropped. Detaching is safe: the worker exits as
                // soon as the write channel disconnects.
                drop(handle);
            }
        }
    }
}

fn worker_loop(
    reactor: DistanceReactor,
    dropped_updates: Arc<AtomicU64>,
    failed_invocations: Arc<AtomicU64>,
    control_rx: Receiver<ControlMsg>,
    write_rx: Receiver<LocationWrite>,
) {
    let mut subs: HashMap<SubscriptionId, Sender<DistanceUpdate>> = HashMap::new();

    loop {
        select! {
            recv(control_rx) -> msg => {
                match msg {
                    Ok(ControlMsg::Subscribe { subscription_id, stream_tx, reply }) => {
                        subs.insert(subscription_id, stream_tx);
                        let _ = reply.send(Ok(()));
                    }
                    Ok(ControlMsg::Unsubscribe { subscription_id }) => {
                        subs.remove(&subscription_id);
                    }
                    // The runtime dropped its control sender; no further work
                    // can arrive either, so stop.
                    Err(_) => break,
                }
            }
            recv(write_rx) -> msg => {
                match msg {
                    Ok(write) => {
                        match reactor.react(&write) {
                            Ok(Reaction::Updated { distance_meters }) => {
                                let update = DistanceUpdate {
                                    session_id: write.session_id,
                                    distance_meters,
                                    computed_at: Utc::now(),
                                };
                                // Never block the worker: drop if a subscriber is slow,
                                // forget subscribers that went away.
                                subs.retain(|_, tx| match tx.try_send(update.clone()) {
                                    Ok(()) => true,
                                    Err(TrySendError::Full(_)) => {
                                        dropped_updates.fetch_add(1, Ordering::Relaxed);
                                        true
                                    }
                                    Err(TrySendError::Disconnected(_)) => false,
                                });
                            }
                            // Expected steady state before both roles report.
                            Ok(Reaction::Incomplete) => {}
                            Err(_) => {
                                failed_invocations.fetch_add(1, Ordering::Relaxed);
                            }
                        }
                    }
                    Err(_) => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_are_bounded() {
        let cfg = ReactorConfig::default();
        assert!(cfg.write_queue_capacity > 0);
        assert!(cfg.control_queue_capacity > 0);
        assert!(cfg.stream_capacity > 0);
    }
}
