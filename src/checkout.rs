use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use crate::error::{OrderError, Result};
use crate::models::{DeliveryAddress, OrderReceipt, PaymentMethod};
use crate::services::OrderSubmitter;
use crate::state::{DraftStore, OrderBuilder};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

static PINCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("valid pincode regex"));

/// One problem with a submitted address form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for AddressFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check an address before it is handed to the builder.
///
/// Returns every failing field, not just the first.
pub fn validate_address(address: &DeliveryAddress) -> Vec<AddressFieldError> {
    let mut errors = Vec::new();
    let mut fail = |field, message| errors.push(AddressFieldError { field, message });

    if address.full_name.trim().is_empty() {
        fail("fullName", "Name is required");
    }
    if address.phone.trim().is_empty() {
        fail("phone", "Phone is required");
    } else if !PHONE_RE.is_match(&address.phone) {
        fail("phone", "Invalid phone number");
    }
    if address.street.trim().is_empty() {
        fail("street", "Street address is required");
    }
    if address.city.trim().is_empty() {
        fail("city", "City is required");
    }
    if address.pincode.trim().is_empty() {
        fail("pincode", "Pincode is required");
    } else if !PINCODE_RE.is_match(&address.pincode) {
        fail("pincode", "Invalid pincode");
    }

    errors
}

/// Validate and store the delivery details on the draft.
pub fn submit_delivery_details<S: DraftStore>(
    builder: &mut OrderBuilder<S>,
    address: DeliveryAddress,
    instructions: &str,
) -> Result<()> {
    let errors = validate_address(&address);
    if !errors.is_empty() {
        return Err(OrderError::InvalidAddress(errors));
    }
    builder.set_address(Some(address));
    builder.set_special_instructions(instructions);
    Ok(())
}

/// The signed-in customer, if any.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub customer: Option<String>,
}

impl Session {
    pub fn signed_in(customer: impl Into<String>) -> Self {
        Self {
            customer: Some(customer.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.customer.is_some()
    }
}

/// Finalize the draft and hand it to the submission service.
///
/// The draft is reset only once the order is accepted; on any failure it is
/// left untouched so the customer can retry.
pub fn place_order<S: DraftStore, O: OrderSubmitter>(
    builder: &mut OrderBuilder<S>,
    submitter: &mut O,
    session: &Session,
    payment: PaymentMethod,
) -> Result<OrderReceipt> {
    let customer = session
        .customer
        .as_deref()
        .ok_or(OrderError::NotAuthenticated)?;

    let order = builder.build_finalized_order()?;

    let receipt = submitter
        .submit(customer, &order, payment)
        .map_err(|e| match e {
            OrderError::SubmissionFailed(msg) => OrderError::SubmissionFailed(msg),
            other => OrderError::SubmissionFailed(other.to_string()),
        })
        .inspect_err(|e| warn!("Order submission failed, draft kept: {}", e))?;

    info!(
        "Order {} placed: total {} via {}",
        receipt.order_id,
        order.total_price,
        payment.as_str()
    );
    builder.reset_draft();
    Ok(receipt)
}
