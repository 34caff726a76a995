pub mod calculations;
pub mod constants;

pub use calculations::{
    bulk_discount, compute_price_breakdown, per_unit_price, round_currency, tax_on,
};
pub use constants::*;
