//! Catalog seeding command.
//!
//! Reads products and bag templates from a YAML file and inserts them
//! through the server repositories. Bag template slots reference
//! products by name, so the file stays readable and ids never appear
//! in it.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::info;

use tazabag_core::{BagCategory, ProductCategory, ProductId};
use tazabag_server::db;
use tazabag_server::db::bag_types::{BagTypeRepository, NewBagType};
use tazabag_server::db::products::{NewProduct, ProductRepository};

/// One product entry in the seed file.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    name: String,
    category: ProductCategory,
    price: Decimal,
    unit: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    nutrition_info: Option<serde_json::Value>,
}

/// One bag template entry in the seed file. Slots name products.
#[derive(Debug, Deserialize)]
struct SeedBagType {
    name: String,
    category: BagCategory,
    price: Decimal,
    items_limit: i32,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    fixed_items: Vec<String>,
    #[serde(default)]
    customizable_items: Vec<String>,
}

/// Top-level seed file layout.
#[derive(Debug, Deserialize)]
struct SeedConfig {
    #[serde(default)]
    products: Vec<SeedProduct>,
    #[serde(default)]
    bag_types: Vec<SeedBagType>,
}

/// Seed the catalog from a YAML file.
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file
/// cannot be read or parsed, a bag slot names an unknown product, or a
/// database operation fails.
pub async fn run(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("TAZABAG_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "TAZABAG_DATABASE_URL not set")?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading catalog from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let config: SeedConfig = serde_yaml::from_str(&content)?;

    info!(
        products = config.products.len(),
        bag_types = config.bag_types.len(),
        "Parsed catalog"
    );

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let product_repo = ProductRepository::new(&pool);
    let mut ids_by_name: HashMap<String, ProductId> = HashMap::new();

    for seed in &config.products {
        let product = product_repo
            .create(&NewProduct {
                name: seed.name.clone(),
                category: seed.category,
                price: seed.price,
                unit: seed.unit.clone(),
                image_url: seed.image_url.clone(),
                description: seed.description.clone(),
                is_available: true,
                nutrition_info: seed.nutrition_info.clone(),
            })
            .await?;
        ids_by_name.insert(product.name.clone(), product.id);
    }
    info!("Inserted {} products", config.products.len());

    let bag_repo = BagTypeRepository::new(&pool);
    for seed in &config.bag_types {
        let fixed_items = resolve_names(&ids_by_name, &seed.fixed_items)?;
        let customizable_items = resolve_names(&ids_by_name, &seed.customizable_items)?;

        bag_repo
            .create(&NewBagType {
                name: seed.name.clone(),
                category: seed.category,
                price: seed.price,
                items_limit: seed.items_limit,
                description: seed.description.clone(),
                is_active: true,
                fixed_items,
                customizable_items,
            })
            .await?;
    }
    info!("Inserted {} bag templates", config.bag_types.len());

    info!("Seeding complete!");
    Ok(())
}

/// Map product names from the seed file to the ids they were inserted
/// under.
fn resolve_names(
    ids_by_name: &HashMap<String, ProductId>,
    names: &[String],
) -> Result<Vec<ProductId>, Box<dyn std::error::Error>> {
    names
        .iter()
        .map(|name| {
            ids_by_name
                .get(name)
                .copied()
                .ok_or_else(|| format!("bag slot references unknown product '{name}'").into())
        })
        .collect()
}
