use clap::Args;
use rust_decimal::Decimal;
use storefront_app::domain::products::{PgProductsService, ProductsService, models::NewProduct};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Product display name
    #[arg(long)]
    name: String,

    /// Unit price, e.g. 19.99
    #[arg(long)]
    price: Decimal,

    /// Optional image URL
    #[arg(long)]
    img_url: Option<String>,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    if args.price.is_sign_negative() {
        return Err("price cannot be negative".to_string());
    }

    let service = PgProductsService::new(args.database.connect().await?);

    let product = service
        .create_product(NewProduct {
            name: args.name,
            price: args.price,
            img_url: args.img_url,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_id: {}", product.id);
    println!("name: {}", product.name);
    println!("price: {}", product.price);

    Ok(())
}
