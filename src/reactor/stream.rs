//! Subscriber stream handle for distance updates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::error::{DistShareError, DistShareResult};

use super::events::{DistanceUpdate, SubscriptionId};
use super::worker::ControlMsg;

/// A subscription stream for [`DistanceUpdate`] events.
///
/// Dropping this stream attempts best-effort unregistration.
#[derive(Debug)]
pub struct UpdateStream {
    subscription_id: SubscriptionId,
    rx: Receiver<DistanceUpdate>,
    control_tx: Sender<ControlMsg>,
    unregistered: AtomicBool,
}

impl UpdateStream {
    pub(crate) fn new(
        subscription_id: SubscriptionId,
        rx: Receiver<DistanceUpdate>,
        control_tx: Sender<ControlMsg>,
    ) -> Self {
        Self {
            subscription_id,
            rx,
            control_tx,
            unregistered: AtomicBool::new(false),
        }
    }

    /// The subscription id backing this stream.
    #[must_use]
    pub const fn subscription_id(&self) -> SubscriptionId {
        self.subscription_id
    }

    /// Best-effort explicit unregistration.
    ///
    /// Non-blocking and idempotent. After the subscription is removed on the
    /// worker side, the stream will eventually become disconnected.
    pub fn unsubscribe(&self) {
        if self.unregistered.swap(true, Ordering::AcqRel) {
            return;
        }

        let _ = self.control_tx.try_send(ControlMsg::Unsubscribe {
            subscription_id: self.subscription_id,
        });
    }

    /// Receive the next update (blocking).
    ///
    /// # Errors
    /// Returns [`DistShareError::Disconnected`] once the worker is gone.
    pub fn recv(&self) -> DistShareResult<DistanceUpdate> {
        self.rx.recv().map_err(|_| DistShareError::Disconnected {
            path: "reactor_stream".to_string(),
        })
    }

    /// Receive the next update with a timeout.
    ///
    /// # Errors
    /// Returns [`DistShareError::Timeout`] when the deadline elapses, or
    /// [`DistShareError::Disconnected`] once the worker is gone.
    #[allow(clippy::cast_possible_truncation)]
    pub fn recv_timeout(&self, timeout: Duration) -> DistShareResult<DistanceUpdate> {
        self.rx.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => DistShareError::Timeout {
                duration_ms: timeout.as_millis().min(u128::from(u64::MAX)) as u64,
            },
            RecvTimeoutError::Disconnected => DistShareError::Disconnected {
                path: "reactor_stream".to_string(),
            },
        })
    }
}

impl Drop for UpdateStream {
    fn drop(&mut self) {
        // Best-effort: do not block on shutdown.
        if !self.unregistered.swap(true, Ordering::AcqRel) {
            let _ = self.control_tx.try_send(ControlMsg::Unsubscribe {
                subscription_id: self.subscription_id,
            });
        }
    }
}
