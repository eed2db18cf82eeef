use std::io::{self, Write};

use clap::{Args, Subcommand};
use shopsmart::prelude::*;
use shopsmart_app::{context::AppContext, domain::reviews::ReviewsController};

use super::print_notices;

#[derive(Debug, Args)]
pub(crate) struct ReviewsCommand {
    #[command(subcommand)]
    command: ReviewsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReviewsSubcommand {
    /// Show the rating summary and reviews
    List(ListArgs),

    /// Post a review
    Submit(SubmitArgs),

    /// Toggle your helpful mark on a review
    Helpful(HelpfulArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct TargetArgs {
    /// Product whose reviews to use
    #[arg(long)]
    product: Option<String>,

    /// Shop whose reviews to use
    #[arg(long)]
    shop: Option<String>,
}

impl TargetArgs {
    fn target(&self) -> Result<ReviewTarget, String> {
        match (&self.product, &self.shop) {
            (Some(product), None) => Ok(ReviewTarget::Product(ProductId::new(product.as_str()))),
            (None, Some(shop)) => Ok(ReviewTarget::Shop(ShopId::new(shop.as_str()))),
            _ => Err("pass exactly one of --product or --shop".to_string()),
        }
    }
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Ordering: "most recent" or "most helpful"
    #[arg(long, default_value_t = ReviewOrdering::MostRecent)]
    order: ReviewOrdering,
}

#[derive(Debug, Args)]
struct SubmitArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Star rating from 1 to 5
    #[arg(long)]
    rating: u8,

    /// Review text
    #[arg(long, default_value = "")]
    comment: String,
}

#[derive(Debug, Args)]
struct HelpfulArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Review to toggle
    review: u64,
}

pub(crate) async fn run(ctx: &AppContext, command: ReviewsCommand) -> Result<(), String> {
    match command.command {
        ReviewsSubcommand::List(args) => list(ctx, args).await,
        ReviewsSubcommand::Submit(args) => submit(ctx, args).await,
        ReviewsSubcommand::Helpful(args) => helpful(ctx, args).await,
    }
}

async fn list(ctx: &AppContext, args: ListArgs) -> Result<(), String> {
    let mut controller = ctx.reviews_controller(args.target.target()?);

    controller.select_ordering(args.order);
    controller
        .load()
        .await
        .map_err(|error| format!("failed to load reviews: {error}"))?;

    render(&controller)
}

async fn submit(ctx: &AppContext, args: SubmitArgs) -> Result<(), String> {
    let rating = Rating::try_from(args.rating).map_err(|error| error.to_string())?;
    let mut controller = ctx.reviews_controller(args.target.target()?);

    controller.select_rating(rating);
    controller.set_comment(args.comment);

    let submitted = controller.submit().await;

    print_notices(controller.take_notices());
    submitted.map_err(|error| format!("failed to submit review: {error}"))?;

    render(&controller)
}

async fn helpful(ctx: &AppContext, args: HelpfulArgs) -> Result<(), String> {
    let review = ReviewId::new(args.review);
    let mut controller = ctx.reviews_controller(args.target.target()?);

    controller
        .load()
        .await
        .map_err(|error| format!("failed to load reviews: {error}"))?;
    controller
        .toggle_helpful(review)
        .await
        .map_err(|error| format!("failed to toggle helpful: {error}"))?;

    let Some(updated) = controller.list().get(review) else {
        return Err(format!("review {review} is not listed for {}", controller.target()));
    };

    println!(
        "review {review}: {} found this helpful{}",
        updated.helpful_count,
        if updated.is_helpful { " (including you)" } else { "" }
    );

    Ok(())
}

fn render(controller: &ReviewsController) -> Result<(), String> {
    let mut out = io::stdout().lock();

    RatingReport::new(controller.summary())
        .write_to(&mut out)
        .map_err(|error| error.to_string())?;

    for review in controller.reviews() {
        let stars = usize::from(review.rating.stars());

        writeln!(
            out,
            "\n#{} {}{} {} · {} · {} helpful{}",
            review.id,
            "★".repeat(stars),
            "☆".repeat(5_usize.saturating_sub(stars)),
            review.author,
            review.time_ago,
            review.helpful_count,
            if review.is_helpful { " (you)" } else { "" }
        )
        .map_err(|error| error.to_string())?;

        if !review.comment.is_empty() {
            writeln!(out, "  {}", review.comment).map_err(|error| error.to_string())?;
        }
    }

    Ok(())
}
