//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is a lightweight pub/sub mechanism: every subscription receives a
//! copy of each message published after it subscribed. It stores nothing;
//! a subscriber that is not listening simply misses messages.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

use thiserror::Error;

/// Errors surfaced by bus implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// Internal lock was poisoned by a panicking publisher/subscriber.
    #[error("event bus lock poisoned")]
    Poisoned,
}

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// while let Ok(event) = subscription.try_recv() {
///     handle(event);
/// }
/// ```
///
/// Subscriptions are meant for a single consumer.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Everything currently buffered, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// - **Broadcast semantics**: each subscriber gets a copy of every message
/// - **Best effort**: publishers treat failures as non-fatal; the domain
///   change that produced the event has already happened
///
/// The trait requires `Send + Sync` so one bus can be shared between the
/// producer and any number of observers.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
