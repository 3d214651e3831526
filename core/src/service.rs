//! Order service: generate orders and audit every one of them.

use crate::batch::BatchSize;
use crate::environment::Clock;
use crate::generator::OrderGenerator;
use crate::logger::{RequestLogger, RequestMeta};
use crate::order::Order;
use crate::request_log::RequestLogStore;
use std::sync::Arc;

/// Serves fabricated orders and appends one audit record per order.
///
/// Neither operation can fail: generation is total and audit failures are
/// swallowed by [`RequestLogger`].
#[derive(Clone)]
pub struct OrderService {
    generator: OrderGenerator,
    logger: RequestLogger,
}

impl OrderService {
    /// Create a service logging to `store` and reading time from `clock`.
    #[must_use]
    pub fn new(store: Arc<dyn RequestLogStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            generator: OrderGenerator::new(Arc::clone(&clock)),
            logger: RequestLogger::new(store, clock),
        }
    }

    /// Fabricate the order `order_id` and log the request.
    pub async fn get_order(&self, order_id: &str, meta: &RequestMeta) -> Order {
        tracing::debug!(order_id, "Generating order");

        let order = self.generator.generate(order_id);
        self.logger.log(order_id, meta).await;
        order
    }

    /// Fabricate `count` orders with ids `1..=count`.
    ///
    /// Each order is logged under its own id before the next one is built.
    pub async fn get_orders(&self, count: BatchSize, meta: &RequestMeta) -> Vec<Order> {
        tracing::debug!(count = count.get(), "Generating order batch");

        let mut orders = Vec::with_capacity(count.get());
        for index in 1..=count.get() {
            let order_id = index.to_string();
            orders.push(self.generator.generate(&order_id));
            self.logger.log(&order_id, meta).await;
        }
        orders
    }
}
