//! Order queue error model.

use thiserror::Error;

use posq_core::DomainError;

use crate::order::Order;

pub type OrderResult<T> = Result<T, OrderError>;

/// Why a queue operation refused an order.
///
/// Every variant is a precondition failure: retrying the same call on the same
/// order gives the same answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Customer id or customer name is empty/blank.
    #[error("order has no customer")]
    NoCustomer,

    #[error("order has no purchases")]
    NoPurchases,

    #[error("purchase of {product_id} has zero quantity")]
    InvalidQuantity { product_id: String },

    /// The order already carries a received timestamp.
    #[error("order was already received")]
    AlreadyReceived,

    #[error("queue is full ({capacity} pending orders)")]
    QueueFull { capacity: usize },

    /// Processing or fulfilment of an order that was never submitted.
    #[error("order has no time received")]
    NoTimeReceived,

    /// Fulfilment of an order that was never processed.
    #[error("order has no time processed")]
    NoTimeProcessed,

    #[error("order was already processed")]
    AlreadyProcessed,

    #[error("order was already fulfilled")]
    AlreadyFulfilled,

    /// Strict mode: the order was not handed out by this queue's `next()`.
    #[error("order was not dequeued from this queue")]
    NotDequeued,
}

/// A submission refused by [`OrderQueue::add`](crate::OrderQueue::add).
///
/// Hands the untouched order back so the caller can fix and resubmit it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct AddRejected {
    pub error: OrderError,
    pub order: Box<Order>,
}

impl AddRejected {
    pub fn new(error: OrderError, order: Order) -> Self {
        Self {
            error,
            order: Box::new(order),
        }
    }

    pub fn into_order(self) -> Order {
        *self.order
    }
}

impl From<AddRejected> for OrderError {
    fn from(rejected: AddRejected) -> Self {
        rejected.error
    }
}

impl From<AddRejected> for DomainError {
    fn from(rejected: AddRejected) -> Self {
        rejected.error.into()
    }
}

impl From<OrderError> for DomainError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NoCustomer
            | OrderError::NoPurchases
            | OrderError::InvalidQuantity { .. } => DomainError::validation(err.to_string()),
            OrderError::AlreadyReceived
            | OrderError::AlreadyProcessed
            | OrderError::AlreadyFulfilled
            | OrderError::QueueFull { .. } => DomainError::conflict(err.to_string()),
            OrderError::NoTimeReceived | OrderError::NoTimeProcessed | OrderError::NotDequeued => {
                DomainError::invariant(err.to_string())
            }
        }
    }
}
