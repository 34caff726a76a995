use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::info;

use crate::error::{OrderError, Result};
use crate::models::{FinalizedOrder, OrderReceipt, PaymentMethod, PlacedOrder};

/// Characters used in generated order ids (no 0/O or 1/I).
const ORDER_ID_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const ORDER_ID_LEN: usize = 8;

/// Accepts finalized orders on behalf of a customer.
pub trait OrderSubmitter {
    fn submit(
        &mut self,
        customer: &str,
        order: &FinalizedOrder,
        payment: PaymentMethod,
    ) -> Result<OrderReceipt>;
}

/// Generate an order id such as `ORD-7KX2M9QA`.
pub fn generate_order_id(rng: &mut impl Rng) -> String {
    let suffix: String = (0..ORDER_ID_LEN)
        .map(|_| ORDER_ID_CHARSET[rng.gen_range(0..ORDER_ID_CHARSET.len())] as char)
        .collect();
    format!("ORD-{}", suffix)
}

/// Records placed orders in a local JSON file.
#[derive(Debug, Clone)]
pub struct LocalOrderLog {
    path: PathBuf,
}

impl LocalOrderLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// All recorded orders, in the order they were placed.
    pub fn load(&self) -> Result<Vec<PlacedOrder>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Orders placed by `customer`, most recent first.
    pub fn orders_for(&self, customer: &str) -> Result<Vec<PlacedOrder>> {
        let mut orders: Vec<PlacedOrder> = self
            .load()?
            .into_iter()
            .filter(|o| o.customer == customer)
            .collect();
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        Ok(orders)
    }

    fn save(&self, orders: &[PlacedOrder]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(orders)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl OrderSubmitter for LocalOrderLog {
    fn submit(
        &mut self,
        customer: &str,
        order: &FinalizedOrder,
        payment: PaymentMethod,
    ) -> Result<OrderReceipt> {
        let mut orders = self
            .load()
            .map_err(|e| OrderError::SubmissionFailed(format!("order log unreadable: {}", e)))?;

        let order_id = generate_order_id(&mut rand::thread_rng());
        orders.push(PlacedOrder::new(
            order_id.clone(),
            customer.to_string(),
            payment,
            order.clone(),
        ));
        self.save(&orders)
            .map_err(|e| OrderError::SubmissionFailed(format!("order log not written: {}", e)))?;

        info!("Order {} recorded for {} ({})", order_id, customer, payment.as_str());
        Ok(OrderReceipt { order_id })
    }
}
