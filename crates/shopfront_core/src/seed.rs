//! Demo catalog contents for fresh databases.

use crate::model::product::Product;
use crate::repo::product_repo::{ProductRepository, RepoResult};
use log::info;
use rust_decimal::Decimal;

struct SeedProduct {
    name: &'static str,
    price_cents: i64,
    description: &'static str,
    image_path: &'static str,
    category: &'static str,
}

const DEMO_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Gaming Laptop",
        price_cents: 250_000,
        description: "Powerful laptop for gaming and work",
        image_path: "images/laptop.svg",
        category: "Electronics",
    },
    SeedProduct {
        name: "Smartphone",
        price_cents: 80_000,
        description: "Modern smartphone with the latest features",
        image_path: "images/phone.svg",
        category: "Electronics",
    },
    SeedProduct {
        name: "Programming Book",
        price_cents: 4_500,
        description: "Book on C# and ASP.NET programming",
        image_path: "images/book.svg",
        category: "Books",
    },
    SeedProduct {
        name: "Coffee Mug",
        price_cents: 1_500,
        description: "Ceramic coffee mug with logo",
        image_path: "images/product-placeholder.svg",
        category: "Other",
    },
];

/// Inserts the demo products when the catalog is empty.
///
/// Returns how many rows were inserted (zero for a non-empty catalog).
/// Seeded rows bypass validation but still carry the name prefix.
pub fn seed_catalog<R: ProductRepository>(repo: &R) -> RepoResult<usize> {
    if !repo.list_products()?.is_empty() {
        info!("event=catalog_seed module=seed status=skipped reason=not_empty");
        return Ok(0);
    }

    for seed in DEMO_PRODUCTS {
        let mut product = Product::new(seed.name, Decimal::new(seed.price_cents, 2));
        product.description = Some(seed.description.to_string());
        product.image_path = Some(seed.image_path.to_string());
        product.category = Some(seed.category.to_string());
        product.apply_name_prefix();
        repo.insert_product(&product)?;
    }

    info!(
        "event=catalog_seed module=seed status=ok inserted={}",
        DEMO_PRODUCTS.len()
    );
    Ok(DEMO_PRODUCTS.len())
}
