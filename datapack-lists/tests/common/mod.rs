#![allow(dead_code)]

use datapack_model::{DataPacket, Identity, Shared, impl_packet, shared_dyn};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber once; `RUST_LOG=debug` shows list events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    #[serde(skip)]
    pub identity: Identity,
    pub number: String,
    pub amount: i64,
    pub lines: Vec<String>,
}

impl_packet!(Order, root = "Order", { number, amount, lines });

impl Order {
    pub fn new(number: &str, amount: i64) -> Self {
        Self {
            number: number.into(),
            amount,
            lines: vec![format!("{number}-1")],
            ..Self::default()
        }
    }
}

/// Shares `number` and `amount` with [`Order`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    #[serde(skip)]
    pub identity: Identity,
    pub number: String,
    pub amount: i64,
    pub due: String,
}

impl_packet!(Invoice, root = "Invoice", { number, amount, due });

impl Invoice {
    pub fn new(number: &str, amount: i64) -> Self {
        Self {
            number: number.into(),
            amount,
            due: "2026-12-31".into(),
            ..Self::default()
        }
    }
}

pub fn dyn_order(number: &str, amount: i64) -> Shared<dyn DataPacket> {
    shared_dyn(Order::new(number, amount))
}

pub fn dyn_invoice(number: &str, amount: i64) -> Shared<dyn DataPacket> {
    shared_dyn(Invoice::new(number, amount))
}

/// Reads a dyn handle back as an `Order`.
pub fn as_order(item: &Shared<dyn DataPacket>) -> Order {
    item.borrow()
        .as_any()
        .downcast_ref::<Order>()
        .cloned()
        .expect("item is not an Order")
}
