//! # Catalog Demo Entry Point
//!
//! Builds the sample smartphone, TV and test categories and prints their
//! listings, summaries and aggregates.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load `CatalogConfig` from the environment
//! 3. Install a construction observer that echoes each new product
//! 4. Build categories from sample field maps
//! 5. Print listings, summaries, combined values and counters
//!
//! ## Usage
//! ```bash
//! cargo run -p catalog-demo
//! CATALOG_SUMMARY_FORMAT=legacy RUST_LOG=debug cargo run -p catalog-demo
//! ```

use std::error::Error;
use std::sync::Arc;

use catalog_core::price::format_price;
use catalog_core::{
    registry, set_observer, AnyProduct, BaseProduct, CatalogConfig, Category, FieldMap,
    LawnGrass, Product, ProductKind, Smartphone,
};
use serde_json::{json, Value};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = CatalogConfig::from_env()?;
    info!(
        combine_mode = %config.combine_mode,
        summary_format = %config.summary_format,
        "Starting catalog demo"
    );

    set_observer(Arc::new(|_kind: ProductKind, repr: &str| println!("{}", repr)));

    let mut smartphones = Category::new(
        "Смартфоны",
        "Смартфоны, как средство не только коммуникации, но и получения дополнительных функций для удобства жизни",
        vec![],
    );
    for fields in sample_smartphones() {
        smartphones.add_product(Smartphone::new_product(&fields)?)?;
    }

    let tv = Product::new_product(&as_fields(json!({
        "name": "55 QLED 4K",
        "description": "Фоновая подсветка",
        "price": 123000.0,
        "quantity": 7
    }))?)?;
    let tvs = Category::new("Телевизоры", "Различные продукты для теста", vec![tv.into()]);

    let mut mixed = Category::new("Тестовая категория", "Категория для тестирования", vec![]);
    mixed.add_product(Smartphone::new(
        "Test2", "Test2", 2000.0, 10, "Высокая", "Модель", 256, "Черный",
    )?)?;
    mixed.add_product(LawnGrass::new(
        "Test3", "Test3", 3000.0, 10, "Россия", 7, "Зеленый",
    )?)?;

    // Non-products are refused and the category is unchanged
    if let Err(err) = mixed.add_product(json!("Not a product")) {
        warn!(error = %err, "Rejected non-product");
    }

    for category in [&smartphones, &tvs, &mixed] {
        println!("{}", category.summary(config.summary_format));
        print!("{}", category.products_display());
        println!("Средний ценник: {}", format_price(category.average_price()));
        println!();
    }

    let first: &AnyProduct = &smartphones.products()[0];
    let second: &AnyProduct = &smartphones.products()[1];
    println!(
        "Сумма двух смартфонов: {}",
        format_price(first.combine_value_with(second, config.combine_mode)?)
    );
    match first.combine_value_with(&mixed.products()[1], config.combine_mode) {
        Ok(total) => println!("Смартфон + газон: {}", format_price(total)),
        Err(err) => println!("Смартфон + газон: {}", err),
    }
    println!(
        "Смартфоны + телевизоры: {}",
        format_price(smartphones.combine_value(&tvs)?)
    );

    let counters = registry::global();
    println!("Всего категорий: {}", counters.category_count());
    println!("Всего продуктов: {}", counters.product_count());

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show category operations
/// - `RUST_LOG=catalog_core=trace` - Also show every product construction
/// - Default: INFO level, debug for this workspace
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog_core=debug,catalog_demo=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn as_fields(value: Value) -> Result<FieldMap, Box<dyn Error>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected a JSON object, got {}", other).into()),
    }
}

fn sample_smartphones() -> Vec<FieldMap> {
    let data = json!([
        {
            "name": "Samsung Galaxy C23 Ultra",
            "description": "256GB, Серый цвет, 200MP камера",
            "price": 180000.0,
            "quantity": 5,
            "efficiency": "Высокая",
            "model": "C23 Ultra",
            "memory": 256,
            "color": "Серый"
        },
        {
            "name": "Iphone 15",
            "description": "512GB, Gray space",
            "price": 210000.0,
            "quantity": 8,
            "efficiency": "Высокая",
            "model": "15",
            "memory": 512,
            "color": "Серый"
        },
        {
            "name": "Xiaomi Redmi Note 11",
            "description": "1024GB, Синий",
            "price": 31000.0,
            "quantity": 14,
            "efficiency": "Высокая",
            "model": "Note 11",
            "memory": 1024,
            "color": "Синий"
        }
    ]);

    match data {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
