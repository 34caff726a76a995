use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OrderError;
use crate::models::{Base, DeliveryAddress};

/// Price breakdown derived from a draft. Never stored on its own.
///
/// Discount and tax may be fractional; only `total` is rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    #[serde(rename = "perThaliPrice")]
    pub per_unit_price: u32,

    #[serde(rename = "subtotal")]
    pub subtotal: u32,

    #[serde(rename = "discount")]
    pub discount: f64,

    #[serde(rename = "tax")]
    pub tax: f64,

    #[serde(rename = "deliveryFee")]
    pub delivery_fee: u32,

    #[serde(rename = "total")]
    pub total: u32,

    #[serde(rename = "hasSpecialSabji")]
    pub has_special_dish: bool,
}

impl PriceBreakdown {
    /// Discount rounded to whole currency units, for display.
    pub fn display_discount(&self) -> u32 {
        self.discount.round() as u32
    }

    /// Tax rounded to whole currency units, for display.
    pub fn display_tax(&self) -> u32 {
        self.tax.round() as u32
    }
}

/// Snapshot of a completed draft, ready for the order submission service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedOrder {
    #[serde(rename = "sabjisSelected")]
    pub dish_names: Vec<String>,

    #[serde(rename = "base")]
    pub base: Base,

    #[serde(rename = "extraRoti")]
    pub extra_units: u32,

    #[serde(rename = "quantity")]
    pub quantity: u32,

    #[serde(rename = "address")]
    pub address: DeliveryAddress,

    #[serde(rename = "specialInstructions")]
    pub special_instructions: String,

    #[serde(rename = "isSpecial")]
    pub is_special: bool,

    #[serde(rename = "totalPrice")]
    pub total_price: u32,

    #[serde(rename = "pricing")]
    pub pricing: PriceBreakdown,
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    Upi,
    Card,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cod, PaymentMethod::Upi, PaymentMethod::Card];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Cash on Delivery",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Debit / Credit Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cod" => Ok(PaymentMethod::Cod),
            "upi" => Ok(PaymentMethod::Upi),
            "card" => Ok(PaymentMethod::Card),
            other => Err(OrderError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Returned by the submission service when an order is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    #[serde(rename = "orderId")]
    pub order_id: String,
}

/// An order as recorded by the local order log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    #[serde(rename = "orderId")]
    pub order_id: String,

    #[serde(rename = "customer")]
    pub customer: String,

    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,

    #[serde(rename = "placedAt")]
    pub placed_at: DateTime<Utc>,

    #[serde(rename = "status")]
    pub status: String,

    #[serde(rename = "order")]
    pub order: FinalizedOrder,
}

impl PlacedOrder {
    pub fn new(
        order_id: String,
        customer: String,
        payment_method: PaymentMethod,
        order: FinalizedOrder,
    ) -> Self {
        Self {
            order_id,
            customer,
            payment_method,
            placed_at: Utc::now(),
            status: "pending".to_string(),
            order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounding() {
        let pricing = PriceBreakdown {
            per_unit_price: 150,
            subtotal: 150,
            discount: 0.0,
            tax: 7.5,
            delivery_fee: 20,
            total: 178,
            has_special_dish: true,
        };
        assert_eq!(pricing.display_tax(), 8);
        assert_eq!(pricing.display_discount(), 0);
    }

    #[test]
    fn test_payment_method_parse() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), method);
        }
        assert!(matches!(
            "bitcoin".parse::<PaymentMethod>(),
            Err(OrderError::UnknownPaymentMethod(_))
        ));
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cod);
    }
}
