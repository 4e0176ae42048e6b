use clap::Args;
use storefront_app::domain::{
    inventory::{InventoryService, PgInventoryService},
    products::models::ProductId,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SetVariantArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Product id
    #[arg(long)]
    product: i64,

    /// Size label; stored trimmed and upper-cased
    #[arg(long)]
    size: String,

    /// Units in stock
    #[arg(long)]
    stock: u32,
}

pub(crate) async fn run(args: SetVariantArgs) -> Result<(), String> {
    let service = PgInventoryService::new(args.database.connect().await?);

    let variant = service
        .set_variant_stock(ProductId::from_i64(args.product), &args.size, args.stock)
        .await
        .map_err(|error| format!("failed to set variant stock: {error}"))?;

    println!(
        "product_id: {} size: {} stock: {}",
        variant.product, variant.size, variant.stock
    );

    Ok(())
}
