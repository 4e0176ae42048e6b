use clap::Args;
use storefront_app::domain::{
    inventory::{InventoryService, PgInventoryService},
    products::models::ProductId,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListVariantsArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Product id
    #[arg(long)]
    product: i64,
}

pub(crate) async fn run(args: ListVariantsArgs) -> Result<(), String> {
    let service = PgInventoryService::new(args.database.connect().await?);

    let variants = service
        .list_variants(ProductId::from_i64(args.product))
        .await
        .map_err(|error| format!("failed to list variants: {error}"))?;

    if variants.is_empty() {
        println!("no sizes stocked for product {}", args.product);
    }

    for variant in variants {
        println!("{}\t{}", variant.size, variant.stock);
    }

    Ok(())
}
