use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use posq_core::{AggregateId, Entity};

use crate::error::OrderError;
use crate::purchase::Purchase;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub AggregateId);

impl OrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    /// Fresh, time-ordered identifier.
    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order lifecycle stage, derived from which timestamps are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Received,
    Processed,
    Fulfilled,
}

/// A customer's order: who ordered, what, and how far it has progressed.
///
/// Timestamps are only ever set by [`OrderQueue`](crate::OrderQueue), one step
/// at a time, so `time_processed` implies `time_received` and
/// `time_fulfilled` implies both. Deserialization enforces the same chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderRecord")]
pub struct Order {
    id: OrderId,
    customer_id: String,
    customer_name: String,
    purchases: Vec<Purchase>,
    time_received: Option<DateTime<Utc>>,
    time_processed: Option<DateTime<Utc>>,
    time_fulfilled: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(customer_id: impl Into<String>, customer_name: impl Into<String>) -> Self {
        Self::with_id(OrderId::generate(), customer_id, customer_name)
    }

    pub fn with_id(
        id: OrderId,
        customer_id: impl Into<String>,
        customer_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            customer_id: customer_id.into(),
            customer_name: customer_name.into(),
            purchases: Vec::new(),
            time_received: None,
            time_processed: None,
            time_fulfilled: None,
        }
    }

    pub fn add_purchase(&mut self, purchase: Purchase) {
        self.purchases.push(purchase);
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn time_received(&self) -> Option<DateTime<Utc>> {
        self.time_received
    }

    pub fn time_processed(&self) -> Option<DateTime<Utc>> {
        self.time_processed
    }

    pub fn time_fulfilled(&self) -> Option<DateTime<Utc>> {
        self.time_fulfilled
    }

    /// Both customer fields contain something other than whitespace.
    pub fn has_customer(&self) -> bool {
        !self.customer_id.trim().is_empty() && !self.customer_name.trim().is_empty()
    }

    pub fn status(&self) -> OrderStatus {
        match (self.time_received, self.time_processed, self.time_fulfilled) {
            (_, _, Some(_)) => OrderStatus::Fulfilled,
            (_, Some(_), None) => OrderStatus::Processed,
            (Some(_), None, None) => OrderStatus::Received,
            (None, None, None) => OrderStatus::Created,
        }
    }

    pub(crate) fn mark_received(&mut self, at: DateTime<Utc>) {
        self.time_received = Some(at);
    }

    pub(crate) fn mark_processed(&mut self, at: DateTime<Utc>) {
        self.time_processed = Some(at);
    }

    pub(crate) fn mark_fulfilled(&mut self, at: DateTime<Utc>) {
        self.time_fulfilled = Some(at);
    }
}

/// Unchecked wire shape of an [`Order`].
#[derive(Deserialize)]
struct OrderRecord {
    id: OrderId,
    customer_id: String,
    customer_name: String,
    purchases: Vec<Purchase>,
    time_received: Option<DateTime<Utc>>,
    time_processed: Option<DateTime<Utc>>,
    time_fulfilled: Option<DateTime<Utc>>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = OrderError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let later_step_set = record.time_processed.is_some() || record.time_fulfilled.is_some();
        if later_step_set && record.time_received.is_none() {
            return Err(OrderError::NoTimeReceived);
        }

        if record.time_fulfilled.is_some() && record.time_processed.is_none() {
            return Err(OrderError::NoTimeProcessed);
        }

        Ok(Self {
            id: record.id,
            customer_id: record.customer_id,
            customer_name: record.customer_name,
            purchases: record.purchases,
            time_received: record.time_received,
            time_processed: record.time_processed,
            time_fulfilled: record.time_fulfilled,
        })
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn new_order_is_created_and_empty() {
        let order = Order::new("CUST00001", "ABC Cafeteria");
        assert_eq!(order.customer_id(), "CUST00001");
        assert_eq!(order.customer_name(), "ABC Cafeteria");
        assert!(order.purchases().is_empty());
        assert_eq!(order.time_received(), None);
        assert_eq!(order.time_processed(), None);
        assert_eq!(order.time_fulfilled(), None);
        assert_eq!(order.status(), OrderStatus::Created);
    }

    #[test]
    fn add_purchase_keeps_insertion_order() {
        let mut order = Order::new("CUST00001", "ABC Cafeteria");
        order.add_purchase(Purchase::new("PROD0004", 450));
        order.add_purchase(Purchase::new("PROD0006", 250));

        let codes: Vec<&str> = order.purchases().iter().map(Purchase::product_id).collect();
        assert_eq!(codes, vec!["PROD0004", "PROD0006"]);
    }

    #[test]
    fn blank_customer_fields_do_not_count() {
        assert!(Order::new("CUST00001", "ABC Cafeteria").has_customer());
        assert!(!Order::new("", "").has_customer());
        assert!(!Order::new("CUST00001", "   ").has_customer());
        assert!(!Order::new("\t", "ABC Cafeteria").has_customer());
    }

    #[test]
    fn status_follows_timestamps() {
        let mut order = Order::new("CUST00001", "ABC Cafeteria");
        order.mark_received(test_time());
        assert_eq!(order.status(), OrderStatus::Received);
        order.mark_processed(test_time());
        assert_eq!(order.status(), OrderStatus::Processed);
        order.mark_fulfilled(test_time());
        assert_eq!(order.status(), OrderStatus::Fulfilled);
    }

    #[test]
    fn deserialize_accepts_a_consistent_timestamp_chain() {
        let mut order = Order::new("CUST00001", "ABC Cafeteria");
        order.add_purchase(Purchase::new("PROD0004", 450));
        order.mark_received(test_time());
        order.mark_processed(test_time());

        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
        assert_eq!(back.status(), OrderStatus::Processed);
    }

    #[test]
    fn deserialize_rejects_fulfilled_without_earlier_steps() {
        let mut order = Order::new("CUST00001", "ABC Cafeteria");
        order.mark_fulfilled(test_time());
        let json = serde_json::to_string(&order).unwrap();

        let err = serde_json::from_str::<Order>(&json).unwrap_err();
        assert!(err.to_string().contains("no time received"), "{err}");
    }

    #[test]
    fn deserialize_rejects_fulfilled_without_processed() {
        let mut order = Order::new("CUST00001", "ABC Cafeteria");
        order.mark_received(test_time());
        order.mark_fulfilled(test_time());
        let json = serde_json::to_string(&order).unwrap();

        let err = serde_json::from_str::<Order>(&json).unwrap_err();
        assert!(err.to_string().contains("no time processed"), "{err}");
    }

    #[test]
    fn deserialize_rejects_processed_without_received() {
        let mut order = Order::new("CUST00001", "ABC Cafeteria");
        order.mark_processed(test_time());
        let json = serde_json::to_string(&order).unwrap();

        assert!(serde_json::from_str::<Order>(&json).is_err());
    }

    #[test]
    fn entity_id_matches_typed_id() {
        let id = OrderId::generate();
        let order = Order::with_id(id, "CUST00001", "ABC Cafeteria");
        assert_eq!(*order.id(), id);
        assert_eq!(order.id_typed(), id);
    }
}
