pub mod checkout;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod pricing;
pub mod services;
pub mod state;

pub use error::{OrderError, Result};
pub use models::{DishSelection, FinalizedOrder, OrderDraft, PriceBreakdown};
pub use state::OrderBuilder;
