use clap::{Parser, Subcommand};

use crate::models::{MealType, PaymentMethod};

/// thali — build a thali, see what it costs, and place the order.
#[derive(Parser, Debug)]
#[command(name = "thali")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the settings TOML file (defaults to thali.toml if present).
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log debug output to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build or resume a thali order interactively.
    Build {
        /// Meal period (lunch or dinner). Defaults to the current time.
        #[arg(long)]
        meal: Option<MealType>,
    },

    /// List today's menu.
    Menu {
        /// Meal period (lunch or dinner). Defaults to the current time.
        #[arg(long)]
        meal: Option<MealType>,
    },

    /// Show the current draft and its price.
    Show,

    /// Place the current draft as an order.
    Checkout {
        /// Payment method (cod, upi or card). Prompts when omitted.
        #[arg(long)]
        payment: Option<PaymentMethod>,
    },

    /// List my placed orders.
    Orders,

    /// Discard the current draft.
    Reset,
}

impl Default for Command {
    fn default() -> Self {
        Command::Build { meal: None }
    }
}
