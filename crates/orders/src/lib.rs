//! Point-of-sale order queue.
//!
//! Orders are built by the caller, submitted to an [`OrderQueue`], handed out
//! in FIFO order, then marked processed and fulfilled. All logic here is
//! in-memory and synchronous (no IO, no storage).

pub mod config;
pub mod error;
pub mod event;
pub mod order;
pub mod purchase;
pub mod queue;

pub use config::QueueConfig;
pub use error::{AddRejected, OrderError, OrderResult};
pub use event::{OrderEvent, OrderFulfilled, OrderProcessed, OrderReceived};
pub use order::{Order, OrderId, OrderStatus};
pub use purchase::Purchase;
pub use queue::{OrderQueue, Publisher};
