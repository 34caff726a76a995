pub mod menu;
pub mod orders;

pub use menu::{match_dishes, FileMenuSource, MenuSource, FUZZY_MATCH_THRESHOLD};
pub use orders::{generate_order_id, LocalOrderLog, OrderSubmitter};
