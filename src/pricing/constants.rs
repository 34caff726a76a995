/// Price of one plain thali.
pub const BASE_THALI_PRICE: u32 = 120;

/// Per-thali surcharge when any selected dish is special.
pub const SPECIAL_DISH_SURCHARGE: u32 = 20;

/// Price of one extra roti.
pub const EXTRA_ROTI_PRICE: u32 = 5;

/// Bulk discount applies from this many thalis.
pub const BULK_DISCOUNT_MIN_QUANTITY: u32 = 3;

/// Bulk discount rate on the subtotal.
pub const BULK_DISCOUNT_RATE: f64 = 0.05;

/// Tax rate on the discounted subtotal.
pub const TAX_RATE: f64 = 0.05;

/// Flat delivery fee per order.
pub const DELIVERY_FEE: u32 = 20;

// ─────────────────────────────────────────────────────────────────────────────
// Selection bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Dishes per thali.
pub const MAX_DISHES: usize = 2;

pub const MIN_EXTRA_UNITS: u32 = 0;
pub const MAX_EXTRA_UNITS: u32 = 3;

pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 5;

/// Wizard steps: 1 = build, 2 = summary, 3 = checkout.
pub const MIN_STEP: u32 = 1;
pub const MAX_STEP: u32 = 3;

/// Fixed storage key for the persisted draft.
pub const DRAFT_STORAGE_KEY: &str = "thali_order";
