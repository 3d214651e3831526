//! Synthetic order records.
//!
//! Orders are built by [`crate::generator`], serialized into a response and
//! dropped. Field names are part of the wire format consumed by the printing
//! front end, so they keep their snake_case spelling.

use serde::{Deserialize, Serialize};

/// A fabricated customer shipment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// `ORDER-{id}-{suffix}` where the suffix comes from the clock
    pub order_sn: String,
    /// Creation time, local time formatted `YYYY/M/D HH:MM:SS`
    pub created_at: String,
    /// Consignee label, includes the item count
    pub consignee: String,
    /// Consignee phone
    pub mobile: String,
    /// Delivery address
    pub full_address: String,
    /// Shipping carrier
    pub shipping_name: String,
    /// Salesperson name
    pub user_name: String,
    /// Salesperson phone
    pub user_phone: String,
    /// Free-text remark
    pub remark: String,
    /// Line items, never empty
    pub items_list: Vec<OrderItem>,
}

impl Order {
    /// Number of line items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items_list.len()
    }
}

/// One line of a fabricated order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Unique within the order
    pub goods_id: u32,
    /// Display name
    pub goods_name: String,
    /// Spec text
    pub spec_info: String,
    /// Size text
    pub size_info: String,
    /// Service annotation, `-` when there is none
    pub service_info: String,
    /// Quantity, always 1
    pub num: u32,
    /// Package count, 1 to 3
    pub package_num: u32,
}
