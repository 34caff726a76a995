use clap::Parser;
use dialoguer::Select;
use tracing::{Level, debug};

use thali_order_rs::checkout::{Session, place_order, submit_delivery_details};
use thali_order_rs::cli::{Cli, Command};
use thali_order_rs::config::Settings;
use thali_order_rs::error::{OrderError, Result};
use thali_order_rs::interface::{
    display_menu, display_order_summary, display_orders, display_price_breakdown, prompt_address,
    prompt_base, prompt_dish, prompt_extra_units, prompt_payment_method, prompt_quantity,
    prompt_special_instructions, prompt_yes_no,
};
use thali_order_rs::models::{MealType, Menu, PaymentMethod};
use thali_order_rs::pricing::MAX_DISHES;
use thali_order_rs::services::{FileMenuSource, LocalOrderLog, MenuSource};
use thali_order_rs::state::{DishToggle, FileDraftStore, OrderBuilder};

type Builder = OrderBuilder<FileDraftStore>;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("Settings: {:?}", settings);

    let command = cli.command.unwrap_or_default();

    match command {
        Command::Build { meal } => cmd_build(&settings, meal),
        Command::Menu { meal } => cmd_menu(&settings, meal),
        Command::Show => cmd_show(&settings),
        Command::Checkout { payment } => cmd_checkout(&settings, payment),
        Command::Orders => cmd_orders(&settings),
        Command::Reset => cmd_reset(&settings),
    }
}

fn load_builder(settings: &Settings) -> Builder {
    OrderBuilder::load(FileDraftStore::new(&settings.storage_dir))
}

fn session(settings: &Settings) -> Session {
    match &settings.customer {
        Some(customer) => Session::signed_in(customer.clone()),
        None => Session::anonymous(),
    }
}

fn load_menu_for(settings: &Settings, meal: Option<MealType>) -> Result<Menu> {
    let meal = meal.unwrap_or_else(MealType::current);
    FileMenuSource::new(&settings.menu_dir).menu_for(meal)
}

/// Print today's menu.
fn cmd_menu(settings: &Settings, meal: Option<MealType>) -> Result<()> {
    let menu = load_menu_for(settings, meal)?;
    let builder = load_builder(settings);
    display_menu(&menu, builder.draft());
    Ok(())
}

/// Walk the three-step order wizard, resuming at the stored step.
fn cmd_build(settings: &Settings, meal: Option<MealType>) -> Result<()> {
    let menu = load_menu_for(settings, meal)?;
    let mut builder = load_builder(settings);

    if builder.draft().step() > 1 || !builder.draft().selected_dishes().is_empty() {
        println!("Resuming your order at step {}.", builder.draft().step());
    }

    loop {
        match builder.draft().step() {
            1 => {
                if !step_choose_meal(&mut builder, &menu)? {
                    println!("Your selection is saved. Run `thali build` to continue.");
                    return Ok(());
                }
                builder.advance_step();
            }
            2 => match step_review(&mut builder)? {
                ReviewChoice::Continue => builder.advance_step(),
                ReviewChoice::Back => builder.retreat_step(),
                ReviewChoice::Exit => return Ok(()),
            },
            _ => {
                step_delivery(&mut builder)?;
                if prompt_yes_no("Proceed to payment now?", true)? {
                    return cmd_checkout(settings, None);
                }
                println!("Your order is saved. Run `thali checkout` when you are ready.");
                return Ok(());
            }
        }
    }
}

/// Step 1: sabjis, base and extra rotis. Returns true once two sabjis are
/// chosen and the customer wants to continue.
fn step_choose_meal(builder: &mut Builder, menu: &Menu) -> Result<bool> {
    loop {
        display_menu(menu, builder.draft());

        if let Some(dish) = prompt_dish(menu)? {
            match builder.select_dish(&dish) {
                DishToggle::Added => println!("Added: {}", dish.name),
                DishToggle::Removed => println!("Removed: {}", dish.name),
                DishToggle::Ignored => {
                    println!("You already have {} sabjis. Remove one first.", MAX_DISHES)
                }
            }
            continue;
        }

        let base = prompt_base(builder.draft().base())?;
        builder.select_base(base);

        let extras = prompt_extra_units(builder.draft().extra_units())?;
        builder.set_extra_units(extras);

        println!(
            "Price per thali: Rs.{}",
            builder.price_breakdown().per_unit_price
        );

        if builder.draft().selected_dishes().len() == MAX_DISHES {
            return Ok(true);
        }

        println!(
            "Please choose {} sabjis to continue ({} selected).",
            MAX_DISHES,
            builder.draft().selected_dishes().len()
        );
        if !prompt_yes_no("Keep choosing?", true)? {
            return Ok(false);
        }
    }
}

enum ReviewChoice {
    Continue,
    Back,
    Exit,
}

/// Step 2: quantity and order summary.
fn step_review(builder: &mut Builder) -> Result<ReviewChoice> {
    let quantity = prompt_quantity(builder.draft().quantity())?;
    builder.set_quantity(quantity);

    display_order_summary(builder.draft());
    display_price_breakdown(&builder.price_breakdown());

    let options = ["Continue to delivery details", "Back to sabjis", "Save and exit"];
    let selection = Select::new()
        .with_prompt("What next?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => ReviewChoice::Continue,
        1 => ReviewChoice::Back,
        _ => ReviewChoice::Exit,
    })
}

/// Step 3: delivery address and instructions, retried until valid.
fn step_delivery(builder: &mut Builder) -> Result<()> {
    loop {
        let address = prompt_address(builder.draft().delivery_address())?;
        let instructions = prompt_special_instructions(builder.draft().special_instructions())?;

        match submit_delivery_details(builder, address, &instructions) {
            Ok(()) => return Ok(()),
            Err(OrderError::InvalidAddress(errors)) => {
                for error in errors {
                    println!("  {}", error);
                }
                println!("Please correct the address.");
            }
            Err(e) => return Err(e),
        }
    }
}

/// Show the current draft.
fn cmd_show(settings: &Settings) -> Result<()> {
    let builder = load_builder(settings);
    display_order_summary(builder.draft());
    display_price_breakdown(&builder.price_breakdown());
    println!("Wizard step: {}/3", builder.draft().step());
    Ok(())
}

/// Place the current draft through the local order log.
fn cmd_checkout(settings: &Settings, payment: Option<PaymentMethod>) -> Result<()> {
    let session = session(settings);
    if !session.is_authenticated() {
        return Err(OrderError::NotAuthenticated);
    }

    let mut builder = load_builder(settings);
    // Fail early, before asking for payment.
    let order = builder.build_finalized_order()?;

    display_order_summary(builder.draft());
    display_price_breakdown(&order.pricing);

    let payment = match payment {
        Some(method) => method,
        None => prompt_payment_method()?,
    };

    if !prompt_yes_no(&format!("Pay Rs.{} by {}?", order.total_price, payment), true)? {
        println!("Order not placed. Your draft is saved.");
        return Ok(());
    }

    let mut log = LocalOrderLog::new(&settings.orders_file);
    let receipt = place_order(&mut builder, &mut log, &session, payment)?;

    println!();
    println!("Order placed! Your order id is {}.", receipt.order_id);
    println!("Estimated delivery: 30-40 minutes after order confirmation.");
    Ok(())
}

/// List the signed-in customer's orders.
fn cmd_orders(settings: &Settings) -> Result<()> {
    let session = session(settings);
    let customer = session
        .customer
        .as_deref()
        .ok_or(OrderError::NotAuthenticated)?;

    let orders = LocalOrderLog::new(&settings.orders_file).orders_for(customer)?;
    display_orders(&orders);
    Ok(())
}

/// Discard the current draft.
fn cmd_reset(settings: &Settings) -> Result<()> {
    let mut builder = load_builder(settings);
    builder.reset_draft();
    println!("Order draft cleared.");
    Ok(())
}
