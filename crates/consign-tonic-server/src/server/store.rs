//! Shared in-memory order store.
//!
//! The store is the only structure touched by concurrently active calls,
//! so all access goes through a reader/writer lock. Handlers never see
//! the raw map; they interact with the [`OrderStore`] contract only.
//!
//! There is no persistence and no eviction: the store lives for the
//! process lifetime, seeded at startup and mutated by add/update calls.

use consign_tonic_core::proto::Order;
use consign_tonic_core::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Process-wide keyed store mapping order id to order record.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: RwLock<HashMap<String, Order>>,
}

impl OrderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the five sample orders (`102`-`106`)
    /// used by the reference deployment.
    pub fn with_sample_data() -> Self {
        let store = Self::new();
        for order in sample_orders() {
            store.put(order);
        }
        store
    }

    /// Inserts or overwrites the record keyed by `order.id`.
    pub fn put(&self, order: Order) {
        self.orders.write().insert(order.id.clone(), order);
    }

    /// Exact-key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OrderNotFound`] when no record exists under `id`.
    pub fn get(&self, id: &str) -> Result<Order> {
        self.orders
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::OrderNotFound { id: id.to_string() })
    }

    /// Linear scan yielding every order with an item containing `query`.
    ///
    /// The first matching item is sufficient; scanning of that order's
    /// items then stops. The result is a snapshot, not a live view, and
    /// its ordering is unspecified.
    pub fn search(&self, query: &str) -> Vec<Order> {
        self.orders
            .read()
            .values()
            .filter(|order| order.items.iter().any(|item| item.contains(query)))
            .cloned()
            .collect()
    }

    /// Number of stored orders.
    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    /// Whether the store holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }
}

/// The fixed sample data set loaded at service startup.
fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: "102".to_string(),
            items: vec!["Google Pixel 3A".to_string(), "Mac Book Pro".to_string()],
            description: String::new(),
            price: 1800.00,
            destination: "Mountain View, CA".to_string(),
        },
        Order {
            id: "103".to_string(),
            items: vec!["Apple Watch S4".to_string()],
            description: String::new(),
            price: 400.00,
            destination: "San Jose, CA".to_string(),
        },
        Order {
            id: "104".to_string(),
            items: vec![
                "Google Home Mini".to_string(),
                "Google Nest Hub".to_string(),
            ],
            description: String::new(),
            price: 400.00,
            destination: "Mountain View, CA".to_string(),
        },
        Order {
            id: "105".to_string(),
            items: vec!["Amazon Echo".to_string()],
            description: String::new(),
            price: 30.00,
            destination: "San Jose, CA".to_string(),
        },
        Order {
            id: "106".to_string(),
            items: vec!["Amazon Echo".to_string(), "Apple iPhone XS".to_string()],
            description: String::new(),
            price: 300.00,
            destination: "Mountain View, CA".to_string(),
        },
    ]
}
