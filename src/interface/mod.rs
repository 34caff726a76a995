pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_address, prompt_base, prompt_dish, prompt_extra_units, prompt_payment_method,
    prompt_quantity, prompt_special_instructions, prompt_yes_no,
};
pub use render::{display_menu, display_order_summary, display_orders, display_price_breakdown};
