mod address;
mod base;
mod dish;
mod draft;
mod order;

pub use address::DeliveryAddress;
pub use base::Base;
pub use dish::{DishSelection, MealType, Menu};
pub use draft::OrderDraft;
pub use order::{FinalizedOrder, OrderReceipt, PaymentMethod, PlacedOrder, PriceBreakdown};
