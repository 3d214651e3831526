//! Mock order generation.
//!
//! Every call fabricates a new [`Order`] with 1 to 15 items. Orders with more
//! than [`LARGE_ORDER_THRESHOLD`] items are "large": the flag only swaps the
//! cosmetic text used to exercise the front end's duplex printing and paging.
//!
//! # Example
//!
//! ```
//! use order_mock_core::environment::SystemClock;
//! use order_mock_core::generator::OrderGenerator;
//! use std::sync::Arc;
//!
//! let generator = OrderGenerator::new(Arc::new(SystemClock));
//! let order = generator.generate("10");
//! assert!(order.order_sn.starts_with("ORDER-10-"));
//! assert!((1..=15).contains(&order.items_list.len()));
//! ```

use crate::environment::Clock;
use crate::order::{Order, OrderItem};
use chrono::{DateTime, Local, Utc};
use rand::Rng;
use std::sync::Arc;

/// Fewest items an order can carry.
pub const MIN_ITEMS: usize = 1;

/// Most items an order can carry.
pub const MAX_ITEMS: usize = 15;

/// Orders with more items than this are large.
pub const LARGE_ORDER_THRESHOLD: usize = 8;

const FIRST_GOODS_ID: u32 = 1000;
const SIZE_INFO: &str = "1800*2000*450mm";
const SERVICE_INFO: &str = "升级乳胶垫";
const NO_SERVICE: &str = "-";
const MOBILE: &str = "13800138000";
const FULL_ADDRESS: &str = "广东省深圳市南山区科技园阿里云大厦10楼后端开发部";
const SHIPPING_NAME: &str = "顺丰速运";
const USER_NAME: &str = "王销售";
const USER_PHONE: &str = "13912345678";

/// Cosmetic variant picked by item count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Variant {
    Regular,
    Large,
}

impl Variant {
    const fn for_count(item_count: usize) -> Self {
        if item_count > LARGE_ORDER_THRESHOLD {
            Self::Large
        } else {
            Self::Regular
        }
    }

    const fn goods_label(self) -> &'static str {
        match self {
            Self::Regular => "普通款",
            Self::Large => "大量测试款",
        }
    }

    const fn spec_info(self) -> &'static str {
        match self {
            Self::Regular => "1.8米大床 / 胡桃木",
            Self::Large => "双联打印测试规格",
        }
    }

    fn consignee(self, item_count: usize) -> String {
        match self {
            Self::Regular => format!("张三丰(共{item_count}件)"),
            Self::Large => format!("李分页(共{item_count}件)"),
        }
    }

    fn remark(self, item_count: usize) -> String {
        match self {
            Self::Regular => "请送货上门，到了打电话。".to_string(),
            Self::Large => format!(
                "这是一个包含 {item_count} 个商品的测试订单，用于测试双联打印和自动分页功能是否正常。"
            ),
        }
    }
}

/// Generates orders using an injected clock and the thread-local RNG.
#[derive(Clone)]
pub struct OrderGenerator {
    clock: Arc<dyn Clock>,
}

impl OrderGenerator {
    /// Create a generator reading time from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Fabricate an order for `order_id`.
    #[must_use]
    pub fn generate(&self, order_id: &str) -> Order {
        self.generate_with_rng(order_id, &mut rand::thread_rng())
    }

    /// Fabricate an order drawing randomness from `rng`.
    #[must_use]
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, order_id: &str, rng: &mut R) -> Order {
        generate_order(order_id, self.clock.now(), rng)
    }
}

/// Fabricate an order for `order_id` as of `now`.
///
/// The item count is uniform in [`MIN_ITEMS`]..=[`MAX_ITEMS`] and each item's
/// package count is uniform in 1..=3.
#[must_use]
pub fn generate_order<R: Rng + ?Sized>(order_id: &str, now: DateTime<Utc>, rng: &mut R) -> Order {
    let item_count = rng.gen_range(MIN_ITEMS..=MAX_ITEMS);
    build_order(order_id, now, item_count, rng)
}

fn build_order<R: Rng + ?Sized>(
    order_id: &str,
    now: DateTime<Utc>,
    item_count: usize,
    rng: &mut R,
) -> Order {
    let variant = Variant::for_count(item_count);

    let items_list = (1..=item_count)
        .zip(FIRST_GOODS_ID + 1..)
        .map(|(position, goods_id)| OrderItem {
            goods_id,
            goods_name: format!("API动态商品 - {} {}", variant.goods_label(), item_letter(position)),
            spec_info: variant.spec_info().to_string(),
            size_info: SIZE_INFO.to_string(),
            service_info: if position % 2 == 0 { SERVICE_INFO } else { NO_SERVICE }.to_string(),
            num: 1,
            package_num: rng.gen_range(1..=3),
        })
        .collect();

    metrics::counter!("orders.generated").increment(1);

    Order {
        order_sn: order_sn(order_id, now),
        created_at: now.with_timezone(&Local).format("%Y/%-m/%-d %H:%M:%S").to_string(),
        consignee: variant.consignee(item_count),
        mobile: MOBILE.to_string(),
        full_address: FULL_ADDRESS.to_string(),
        shipping_name: SHIPPING_NAME.to_string(),
        user_name: USER_NAME.to_string(),
        user_phone: USER_PHONE.to_string(),
        remark: variant.remark(item_count),
        items_list,
    }
}

/// `ORDER-{id}-{last six digits of the epoch millis}`.
fn order_sn(order_id: &str, now: DateTime<Utc>) -> String {
    let suffix = now.timestamp_millis().rem_euclid(1_000_000);
    format!("ORDER-{order_id}-{suffix:06}")
}

/// `A` for position 1 through `Z` for 26, wrapping after that.
#[allow(clippy::cast_possible_truncation)] // always < 26
fn item_letter(position: usize) -> char {
    let offset = (position + 25) % 26;
    char::from(b'A' + offset as u8)
}
