use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use posq_events::Event;

use crate::order::OrderId;

/// Emitted when `add` accepts an order into the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceived {
    pub order_id: OrderId,
    pub customer_id: String,
    pub purchase_count: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProcessed {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Emitted on the final lifecycle step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFulfilled {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Lifecycle transitions published by the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    Received(OrderReceived),
    Processed(OrderProcessed),
    Fulfilled(OrderFulfilled),
}

impl OrderEvent {
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderEvent::Received(e) => e.order_id,
            OrderEvent::Processed(e) => e.order_id,
            OrderEvent::Fulfilled(e) => e.order_id,
        }
    }
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Received(_) => "orders.order.received",
            OrderEvent::Processed(_) => "orders.order.processed",
            OrderEvent::Fulfilled(_) => "orders.order.fulfilled",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::Received(e) => e.occurred_at,
            OrderEvent::Processed(e) => e.occurred_at,
            OrderEvent::Fulfilled(e) => e.occurred_at,
        }
    }
}
