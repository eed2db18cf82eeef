use std::io;

use clap::{Args, Subcommand};
use shopsmart::prelude::*;
use shopsmart_app::{context::AppContext, domain::cart::CartController};

use super::print_notices;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show cart lines and the selected total
    Show(SelectionArgs),

    /// Add a product, or more of one already in the cart
    Add(AddArgs),

    /// Set a product's quantity
    Set(SetArgs),

    /// Remove a product's line
    Remove(ProductArgs),

    /// Place a cash-on-delivery order for one shop's selected lines
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
struct SelectionArgs {
    /// Leave a product out of the selected total
    #[arg(long = "exclude", value_name = "PRODUCT")]
    excluded: Vec<String>,
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Product id
    product: String,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product id
    product: String,

    /// How many to add
    #[arg(long, default_value_t = 1)]
    quantity: i64,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Product id
    product: String,

    /// New quantity; values below one become one
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Shop to order from
    #[arg(long)]
    shop: String,

    /// Delivery address
    #[arg(long)]
    address: String,

    #[command(flatten)]
    selection: SelectionArgs,
}

pub(crate) async fn run(ctx: &AppContext, command: CartCommand) -> Result<(), String> {
    let mut controller = ctx.cart_controller();

    controller
        .refresh()
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    match command.command {
        CartSubcommand::Show(args) => deselect(&mut controller, &args)?,
        CartSubcommand::Add(args) => {
            controller
                .add(&ProductId::new(args.product), args.quantity)
                .await
                .map_err(|error| format!("failed to add to cart: {error}"))?;
        }
        CartSubcommand::Set(args) => {
            controller
                .set_quantity(&ProductId::new(args.product), args.quantity)
                .await
                .map_err(|error| format!("failed to update quantity: {error}"))?;
        }
        CartSubcommand::Remove(args) => {
            controller
                .remove(&ProductId::new(args.product))
                .await
                .map_err(|error| format!("failed to remove from cart: {error}"))?;
        }
        CartSubcommand::Checkout(args) => return checkout(&mut controller, args).await,
    }

    render(&controller)
}

fn deselect(controller: &mut CartController, args: &SelectionArgs) -> Result<(), String> {
    for product in &args.excluded {
        let product = ProductId::new(product.as_str());

        if controller.cart().item(&product).is_none() {
            return Err(format!("product {product} is not in the cart"));
        }

        controller
            .toggle_selection(&product)
            .map_err(|error| error.to_string())?;
    }

    Ok(())
}

async fn checkout(controller: &mut CartController, args: CheckoutArgs) -> Result<(), String> {
    deselect(controller, &args.selection)?;

    let placed = controller
        .checkout(&ShopId::new(args.shop), &args.address)
        .await;

    print_notices(controller.take_notices());

    let confirmation = placed.map_err(|error| format!("checkout failed: {error}"))?;

    println!(
        "order {} / {} ({}) to {}",
        confirmation.order_id.as_deref().unwrap_or("pending"),
        confirmation.shop_order_id.as_deref().unwrap_or("-"),
        confirmation.payment_method.as_str(),
        confirmation.shipping_address
    );

    render(controller)
}

fn render(controller: &CartController) -> Result<(), String> {
    CartReceipt::new(controller.cart())
        .write_to(io::stdout().lock())
        .map_err(|error| error.to_string())
}
