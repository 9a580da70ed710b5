#![allow(dead_code)]

use datapack_model::{Identified, Identity, Packet, impl_packet};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber once; `RUST_LOG=trace` shows packet events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(skip)]
    pub identity: Identity,
    pub name: String,
    pub credit: i64,
    pub active: bool,
    pub tags: Vec<String>,
    pub address: Address,
}

impl_packet!(Customer, root = "Customer", { name, credit, active, tags, address });

impl Customer {
    pub fn sample() -> Self {
        Self {
            identity: Identity::default(),
            name: "Ada".into(),
            credit: 1200,
            active: true,
            tags: vec!["vip".into(), "north".into()],
            address: Address {
                street: "1 Analytical Way".into(),
                city: "London".into(),
            },
        }
    }
}

/// Shares `name` and `credit` with [`Customer`], nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(skip)]
    pub identity: Identity,
    pub name: String,
    pub credit: i64,
    pub phone: String,
}

impl_packet!(Contact { name, credit, phone });

/// Same field name as [`Customer::credit`] but an incompatible type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    #[serde(skip)]
    pub identity: Identity,
    pub credit: String,
}

impl_packet!(Rating { credit });

/// Hand-written packet with bookkeeping outside the identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    #[serde(skip)]
    pub identity: Identity,
    #[serde(skip)]
    pub dirty: bool,
    pub balance: i64,
}

impl Identified for Ledger {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn reset(&mut self) {
        self.identity_mut().reset();
        self.dirty = false;
    }
}

impl Packet for Ledger {
    const ROOT_NODE_NAME: &'static str = "Ledger";

    fn take_content(&mut self, from: Self) {
        self.balance = from.balance;
        self.dirty = true;
    }
}

/// Interop-style packet with PascalCase wire names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Employee {
    #[serde(skip)]
    pub identity: Identity,
    pub full_name: String,
    pub badge: i64,
}

impl_packet!(Employee, root = "Employee", { full_name, badge });

/// Shares the wire names `FullName` and `Badge` with [`Employee`]; the Rust
/// field for the badge is named differently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Person {
    #[serde(skip)]
    pub identity: Identity,
    pub full_name: String,
    #[serde(rename = "Badge")]
    pub badge_number: i64,
    pub email: String,
}

impl_packet!(Person, root = "Person", { full_name, badge_number, email });
