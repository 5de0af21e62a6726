//! FIFO order queue and the lifecycle transitions it guards.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tracing::{debug, info, warn};

use posq_core::{Clock, SystemClock};
use posq_events::{BusError, EventBus};

use crate::config::QueueConfig;
use crate::error::{AddRejected, OrderError, OrderResult};
use crate::event::{OrderEvent, OrderFulfilled, OrderProcessed, OrderReceived};
use crate::order::{Order, OrderId};

/// Shared sink for lifecycle events.
pub type Publisher = Arc<dyn EventBus<OrderEvent, Error = BusError>>;

/// Holds submitted orders until they are dequeued and advances each order
/// through `Created → Received → Processed → Fulfilled`.
///
/// The queue owns an order from `add` until `next` hands it back; `process`
/// and `fulfill` then work on the caller's copy. Dequeued ids are only
/// remembered when `require_dequeued` is on, until fulfilled or abandoned.
pub struct OrderQueue<C: Clock = SystemClock> {
    pending: VecDeque<Order>,
    in_flight: HashSet<OrderId>,
    config: QueueConfig,
    clock: C,
    publisher: Option<Publisher>,
}

impl OrderQueue<SystemClock> {
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    pub fn with_config(config: QueueConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for OrderQueue<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> OrderQueue<C> {
    pub fn with_clock(config: QueueConfig, clock: C) -> Self {
        Self {
            pending: VecDeque::new(),
            in_flight: HashSet::new(),
            config,
            clock,
            publisher: None,
        }
    }

    /// Publish lifecycle events to `bus` after each successful transition.
    pub fn with_publisher(mut self, bus: Publisher) -> Self {
        self.publisher = Some(bus);
        self
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Validate and enqueue an order, stamping its received time.
    ///
    /// Checks run in a fixed order: customer, purchases, quantities (when
    /// configured), prior submission, capacity. A rejected order comes back
    /// untouched inside the error.
    pub fn add(&mut self, mut order: Order) -> Result<OrderId, AddRejected> {
        if let Err(err) = self.check_submittable(&order) {
            warn!(
                order_id = %order.id_typed(),
                customer_id = %order.customer_id(),
                error = %err,
                "order rejected"
            );
            return Err(AddRejected::new(err, order));
        }

        let now = self.clock.now();
        order.mark_received(now);

        let order_id = order.id_typed();
        info!(
            order_id = %order_id,
            customer_id = %order.customer_id(),
            purchases = order.purchases().len(),
            pending = self.pending.len() + 1,
            "order received"
        );

        let event = OrderEvent::Received(OrderReceived {
            order_id,
            customer_id: order.customer_id().to_string(),
            purchase_count: order.purchases().len(),
            occurred_at: now,
        });
        self.pending.push_back(order);
        self.publish(event);

        Ok(order_id)
    }

    /// Remove and return the oldest pending order, if any.
    ///
    /// Timestamps are left alone. With `require_dequeued` on, the order is
    /// recorded as in flight until it is fulfilled or abandoned.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Order> {
        let Some(order) = self.pending.pop_front() else {
            debug!("no pending orders");
            return None;
        };

        if self.config.require_dequeued {
            self.in_flight.insert(order.id_typed());
        }
        info!(
            order_id = %order.id_typed(),
            pending = self.pending.len(),
            "order dequeued"
        );
        Some(order)
    }

    /// Mark an order as processed.
    pub fn process(&mut self, order: &mut Order) -> OrderResult<()> {
        if let Err(err) = self.check_processable(order) {
            warn!(order_id = %order.id_typed(), error = %err, "process rejected");
            return Err(err);
        }

        let now = self.clock.now();
        order.mark_processed(now);
        info!(order_id = %order.id_typed(), "order processed");

        self.publish(OrderEvent::Processed(OrderProcessed {
            order_id: order.id_typed(),
            occurred_at: now,
        }));
        Ok(())
    }

    /// Mark a processed order as fulfilled. This is the final step.
    pub fn fulfill(&mut self, order: &mut Order) -> OrderResult<()> {
        if let Err(err) = self.check_fulfillable(order) {
            warn!(order_id = %order.id_typed(), error = %err, "fulfill rejected");
            return Err(err);
        }

        let now = self.clock.now();
        order.mark_fulfilled(now);
        self.in_flight.remove(&order.id_typed());
        info!(order_id = %order.id_typed(), "order fulfilled");

        self.publish(OrderEvent::Fulfilled(OrderFulfilled {
            order_id: order.id_typed(),
            occurred_at: now,
        }));
        Ok(())
    }

    /// Forget a dequeued order that will never be fulfilled here.
    ///
    /// Returns whether the id was in flight. Afterwards strict mode rejects it.
    pub fn abandon(&mut self, id: OrderId) -> bool {
        let removed = self.in_flight.remove(&id);
        if removed {
            info!(order_id = %id, "order abandoned");
        }
        removed
    }

    /// Number of orders waiting for `next()`.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The order `next()` would return, without removing it.
    pub fn peek(&self) -> Option<&Order> {
        self.pending.front()
    }

    /// Look up a pending order by id.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.pending.iter().find(|o| o.id_typed() == id)
    }

    /// Pending orders, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.pending.iter()
    }

    /// Number of tracked dequeued orders not yet fulfilled or abandoned.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_in_flight(&self, id: OrderId) -> bool {
        self.in_flight.contains(&id)
    }

    fn check_submittable(&self, order: &Order) -> OrderResult<()> {
        if !order.has_customer() {
            return Err(OrderError::NoCustomer);
        }

        if order.purchases().is_empty() {
            return Err(OrderError::NoPurchases);
        }

        if self.config.reject_zero_quantity {
            if let Some(p) = order.purchases().iter().find(|p| p.quantity() == 0) {
                return Err(OrderError::InvalidQuantity {
                    product_id: p.product_id().to_string(),
                });
            }
        }

        if order.time_received().is_some() {
            return Err(OrderError::AlreadyReceived);
        }

        if let Some(capacity) = self.config.pending_limit() {
            if self.pending.len() >= capacity {
                return Err(OrderError::QueueFull { capacity });
            }
        }

        Ok(())
    }

    fn check_processable(&self, order: &Order) -> OrderResult<()> {
        if order.time_received().is_none() {
            return Err(OrderError::NoTimeReceived);
        }

        if order.time_processed().is_some() {
            return Err(OrderError::AlreadyProcessed);
        }

        self.check_dequeued(order)
    }

    fn check_fulfillable(&self, order: &Order) -> OrderResult<()> {
        if order.time_received().is_none() {
            return Err(OrderError::NoTimeReceived);
        }

        if order.time_processed().is_none() {
            return Err(OrderError::NoTimeProcessed);
        }

        if order.time_fulfilled().is_some() {
            return Err(OrderError::AlreadyFulfilled);
        }

        self.check_dequeued(order)
    }

    fn check_dequeued(&self, order: &Order) -> OrderResult<()> {
        if self.config.require_dequeued && !self.in_flight.contains(&order.id_typed()) {
            return Err(OrderError::NotDequeued);
        }
        Ok(())
    }

    fn publish(&self, event: OrderEvent) {
        let Some(bus) = &self.publisher else {
            return;
        };

        let order_id = event.order_id();
        if let Err(err) = bus.publish(event) {
            warn!(order_id = %order_id, error = %err, "failed to publish order event");
        }
    }
}

impl<C: Clock> core::fmt::Debug for OrderQueue<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OrderQueue")
            .field("pending", &self.pending.len())
            .field("in_flight", &self.in_flight.len())
            .field("config", &self.config)
            .field("publisher", &self.publisher.is_some())
            .finish()
    }
}
