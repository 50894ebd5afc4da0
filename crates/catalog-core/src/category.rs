//! # Categories
//!
//! A named, described, ordered collection of products with aggregate
//! statistics.
//!
//! ## Category Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Category Operations                                  │
//! │                                                                         │
//! │  Call                       Collection change      Counter change       │
//! │  ────                       ─────────────────      ──────────────       │
//! │                                                                         │
//! │  Category::new(.., vec)     products = vec         categories += 1      │
//! │                                                    products += len      │
//! │                                                                         │
//! │  add_product(product)       products.push(p)       products += 1        │
//! │  add_product(non-product)   (none) → error         (none)               │
//! │                                                                         │
//! │  set_products(list)         products = list        (none)               │
//! │  set_products(product)      products.push(p)       (none)               │
//! │  set_products(other)        (none) → error         (none)               │
//! │                                                                         │
//! │  products_display()         (read only)                                 │
//! │  average_price()            (read only)                                 │
//! │  combine_value(other)       (read only)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Non-product Input
//! `add_product` and `set_products` take anything convertible into a
//! [`CatalogValue`], which can carry loosely typed data (a JSON value, a
//! category, a nested list). Anything that is not a product is rejected with
//! `InvalidProductType` and the category is left as it was.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::config::ConfigError;
use crate::error::{CoreError, CoreResult};
use crate::product::{AnyProduct, BaseProduct, LawnGrass, Product, Smartphone};
use crate::registry::{self, CatalogRegistry};

// =============================================================================
// Summary Format
// =============================================================================

/// Which summary line a category produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryFormat {
    /// `"{name}, количество продуктов: {total_quantity} шт."`
    #[default]
    Quantity,

    /// `"Категория: {name}, Описание: {description}, Товаров: {len}"`
    Legacy,
}

impl fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryFormat::Quantity => write!(f, "quantity"),
            SummaryFormat::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for SummaryFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quantity" => Ok(SummaryFormat::Quantity),
            "legacy" => Ok(SummaryFormat::Legacy),
            other => Err(ConfigError::InvalidValue {
                key: "summary format".to_string(),
                value: other.to_string(),
                expected: "quantity, legacy",
            }),
        }
    }
}

// =============================================================================
// Catalog Value
// =============================================================================

/// A value handed to a category, which may or may not be a product.
#[derive(Debug, Clone)]
pub enum CatalogValue {
    Product(AnyProduct),
    List(Vec<CatalogValue>),
    Category(Category),
    Other(Value),
}

impl CatalogValue {
    /// Short type description for error messages.
    pub fn type_name(&self) -> String {
        match self {
            CatalogValue::Product(p) => p.kind().to_string(),
            CatalogValue::List(_) => "list".to_string(),
            CatalogValue::Category(_) => "Category".to_string(),
            CatalogValue::Other(value) => Self::json_type_name(value).to_string(),
        }
    }

    fn json_type_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_product(&self) -> bool {
        matches!(self, CatalogValue::Product(_))
    }
}

impl From<AnyProduct> for CatalogValue {
    fn from(p: AnyProduct) -> Self {
        CatalogValue::Product(p)
    }
}

impl From<Product> for CatalogValue {
    fn from(p: Product) -> Self {
        CatalogValue::Product(p.into())
    }
}

impl From<Smartphone> for CatalogValue {
    fn from(p: Smartphone) -> Self {
        CatalogValue::Product(p.into())
    }
}

impl From<LawnGrass> for CatalogValue {
    fn from(p: LawnGrass) -> Self {
        CatalogValue::Product(p.into())
    }
}

impl From<Category> for CatalogValue {
    fn from(c: Category) -> Self {
        CatalogValue::Category(c)
    }
}

impl From<Value> for CatalogValue {
    fn from(value: Value) -> Self {
        CatalogValue::Other(value)
    }
}

impl<T: Into<CatalogValue>> From<Vec<T>> for CatalogValue {
    fn from(items: Vec<T>) -> Self {
        CatalogValue::List(items.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// Combine Operand
// =============================================================================

/// Anything that may appear on the right of `Category::combine_value`.
pub trait CombineOperand {
    /// The category behind this value, if there is one.
    fn as_category(&self) -> Option<&Category>;

    /// Short type description for error messages.
    fn operand_name(&self) -> String;
}

impl CombineOperand for Category {
    fn as_category(&self) -> Option<&Category> {
        Some(self)
    }

    fn operand_name(&self) -> String {
        "Category".to_string()
    }
}

impl CombineOperand for CatalogValue {
    fn as_category(&self) -> Option<&Category> {
        match self {
            CatalogValue::Category(c) => Some(c),
            _ => None,
        }
    }

    fn operand_name(&self) -> String {
        self.type_name()
    }
}

impl CombineOperand for Value {
    fn as_category(&self) -> Option<&Category> {
        None
    }

    fn operand_name(&self) -> String {
        CatalogValue::json_type_name(self).to_string()
    }
}

macro_rules! impl_product_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CombineOperand for $ty {
                fn as_category(&self) -> Option<&Category> {
                    None
                }

                fn operand_name(&self) -> String {
                    self.kind().to_string()
                }
            }
        )*
    };
}

impl_product_operand!(AnyProduct, Product, Smartphone, LawnGrass);

fn expect_product(value: CatalogValue) -> CoreResult<AnyProduct> {
    match value {
        CatalogValue::Product(p) => Ok(p),
        other => Err(CoreError::InvalidProductType {
            found: other.type_name(),
        }),
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// ## Invariants
/// - Every element of the collection is a product
/// - Insertion order is preserved, duplicates are allowed
/// - A rejected add/assign leaves the collection untouched
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    id: Uuid,
    name: String,
    description: String,
    products: Vec<AnyProduct>,
    #[serde(skip)]
    registry: Arc<CatalogRegistry>,
}

impl Category {
    /// Creates a category counted in the process-wide registry.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        products: Vec<AnyProduct>,
    ) -> Self {
        Self::with_registry(registry::global(), name, description, products)
    }

    /// Creates a category counted in `registry`.
    pub fn with_registry(
        registry: Arc<CatalogRegistry>,
        name: impl Into<String>,
        description: impl Into<String>,
        products: Vec<AnyProduct>,
    ) -> Self {
        registry.record_category(products.len());

        let category = Category {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            products,
            registry,
        };
        debug!(
            id = %category.id,
            name = %category.name,
            products = category.products.len(),
            "Created category"
        );
        category
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The products, in insertion order.
    pub fn products(&self) -> &[AnyProduct] {
        &self.products
    }

    /// Number of entries in the collection (not the stock quantity).
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The registry this category reports to.
    pub fn registry(&self) -> &Arc<CatalogRegistry> {
        &self.registry
    }

    /// Appends a product and bumps the product counter.
    ///
    /// ## Errors
    /// `InvalidProductType` when `value` is not a product. Nothing changes.
    pub fn add_product(&mut self, value: impl Into<CatalogValue>) -> CoreResult<()> {
        let product = expect_product(value.into())?;

        debug!(category = %self.name, product = %product.name(), "Adding product");
        self.products.push(product);
        self.registry.record_product();
        Ok(())
    }

    /// Replaces the collection with a list, or appends a single product.
    ///
    /// Counters are not touched.
    ///
    /// ## Errors
    /// `InvalidProductType` when the value is neither a list nor a product, or
    /// when the list holds anything that is not a product. Nothing changes.
    pub fn set_products(&mut self, value: impl Into<CatalogValue>) -> CoreResult<()> {
        match value.into() {
            CatalogValue::List(items) => {
                let products = items
                    .into_iter()
                    .map(expect_product)
                    .collect::<CoreResult<Vec<_>>>()?;
                debug!(category = %self.name, products = products.len(), "Replacing products");
                self.products = products;
            }
            CatalogValue::Product(product) => {
                debug!(category = %self.name, product = %product.name(), "Appending product");
                self.products.push(product);
            }
            other => {
                return Err(CoreError::InvalidProductType {
                    found: other.type_name(),
                })
            }
        }

        Ok(())
    }

    /// Every product's display line followed by a newline.
    ///
    /// An empty category yields an empty string.
    pub fn products_display(&self) -> String {
        self.products
            .iter()
            .map(|p| format!("{}\n", p.to_display_string()))
            .collect()
    }

    /// Sum of the quantities of all products.
    ///
    /// Widened to `i128` so any number of `i64` quantities adds up exactly.
    pub fn total_quantity(&self) -> i128 {
        self.products.iter().map(|p| i128::from(p.quantity())).sum()
    }

    /// Sum of `price * quantity` over all products.
    pub fn stock_value(&self) -> f64 {
        self.products.iter().map(|p| p.stock_value()).sum()
    }

    /// `"{name}, количество продуктов: {total_quantity} шт."`
    pub fn to_summary_string(&self) -> String {
        self.summary(SummaryFormat::Quantity)
    }

    /// Summary line in the requested format.
    pub fn summary(&self, format: SummaryFormat) -> String {
        match format {
            SummaryFormat::Quantity => format!(
                "{}, количество продуктов: {} шт.",
                self.name,
                self.total_quantity()
            ),
            SummaryFormat::Legacy => format!(
                "Категория: {}, Описание: {}, Товаров: {}",
                self.name,
                self.description,
                self.products.len()
            ),
        }
    }

    /// Sums the stock values of both categories.
    ///
    /// `other` is borrowed: a `Category`, a `CatalogValue`, a product or a
    /// JSON value.
    ///
    /// ## Errors
    /// `IncompatibleType` when `other` is not a category.
    pub fn combine_value<T>(&self, other: &T) -> CoreResult<f64>
    where
        T: CombineOperand + ?Sized,
    {
        match other.as_category() {
            Some(other) => Ok(self + other),
            None => Err(CoreError::IncompatibleType {
                left: "Category".to_string(),
                right: other.operand_name(),
            }),
        }
    }

    /// Mean unit price (not weighted by quantity); `0.0` when empty.
    pub fn average_price(&self) -> f64 {
        if self.products.is_empty() {
            return 0.0;
        }

        let total: f64 = self.products.iter().map(|p| p.price()).sum();
        total / self.products.len() as f64
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_summary_string())
    }
}

/// `&a + &b` is the total stock value of both categories.
impl Add for &Category {
    type Output = f64;

    fn add(self, other: Self) -> f64 {
        self.stock_value() + other.stock_value()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn isolated(products: Vec<AnyProduct>) -> Category {
        Category::with_registry(
            Arc::new(CatalogRegistry::new()),
            "Смартфоны",
            "Смартфоны, как средство не только коммуникации",
            products,
        )
    }

    fn product(price: f64, quantity: i64) -> AnyProduct {
        Product::new("P", "", price, quantity).unwrap().into()
    }

    #[test]
    fn test_new_records_category_and_products() {
        let registry = Arc::new(CatalogRegistry::new());
        let _a = Category::with_registry(Arc::clone(&registry), "A", "", vec![product(1.0, 1)]);
        let _b = Category::with_registry(Arc::clone(&registry), "B", "", vec![]);

        assert_eq!(registry.category_count(), 2);
        assert_eq!(registry.product_count(), 1);
    }

    #[test]
    fn test_add_product() {
        let mut category = isolated(vec![]);
        category.add_product(Product::new("A", "", 10.0, 1).unwrap()).unwrap();

        assert_eq!(category.len(), 1);
        assert_eq!(category.registry().product_count(), 1);
    }

    #[test]
    fn test_add_non_product_is_rejected() {
        let mut category = isolated(vec![product(10.0, 1)]);
        let before = category.registry().product_count();

        let err = category.add_product(json!("Not a product")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidProductType { ref found } if found == "string"));

        let other = isolated(vec![]);
        assert!(category.add_product(other).is_err());

        assert_eq!(category.len(), 1);
        assert_eq!(category.registry().product_count(), before);
    }

    #[test]
    fn test_products_display_empty() {
        assert_eq!(isolated(vec![]).products_display(), "");
    }

    #[test]
    fn test_set_products_replaces_list() {
        let mut category = isolated(vec![product(10.0, 1)]);
        category
            .set_products(vec![product(20.0, 2), product(30.0, 3)])
            .unwrap();

        assert_eq!(category.len(), 2);
        assert_eq!(category.products()[0].price(), 20.0);
        // Replacing does not count as adding
        assert_eq!(category.registry().product_count(), 1);
    }

    #[test]
    fn test_set_products_appends_single() {
        let mut category = isolated(vec![product(10.0, 1)]);
        category.set_products(product(20.0, 2)).unwrap();

        assert_eq!(category.len(), 2);
        assert_eq!(category.products()[1].price(), 20.0);
    }

    #[test]
    fn test_set_products_rejects_mixed_list() {
        let mut category = isolated(vec![product(10.0, 1)]);

        let mixed = vec![
            CatalogValue::from(product(20.0, 2)),
            CatalogValue::from(json!({ "name": "fake" })),
        ];
        let err = category.set_products(mixed).unwrap_err();
        assert!(matches!(err, CoreError::InvalidProductType { .. }));

        assert_eq!(category.len(), 1);
        assert_eq!(category.products()[0].price(), 10.0);
    }

    #[test]
    fn test_set_products_rejects_other() {
        let mut category = isolated(vec![]);
        assert!(category.set_products(json!(42)).is_err());
        assert!(category.is_empty());
    }

    #[test]
    fn test_summary_formats() {
        let category = isolated(vec![product(10.0, 5), product(20.0, 8)]);

        assert_eq!(
            category.to_string(),
            "Смартфоны, количество продуктов: 13 шт."
        );
        assert_eq!(
            category.summary(SummaryFormat::Legacy),
            "Категория: Смартфоны, Описание: Смартфоны, как средство не только коммуникации, Товаров: 2"
        );
    }

    #[test]
    fn test_average_price() {
        assert_eq!(isolated(vec![]).average_price(), 0.0);

        let category = isolated(vec![product(100.0, 10), product(200.0, 1)]);
        assert_eq!(category.average_price(), 150.0);
    }

    #[test]
    fn test_combine_with_non_category() {
        let category = isolated(vec![product(100.0, 10)]);
        let err = category
            .combine_value(&CatalogValue::from(product(1.0, 1)))
            .unwrap_err();
        assert!(matches!(err, CoreError::IncompatibleType { .. }));
    }

    #[test]
    fn test_total_quantity_past_i64_max() {
        let category = isolated(vec![product(1.0, i64::MAX), product(1.0, 1)]);

        let expected = i128::from(i64::MAX) + 1;
        assert_eq!(category.total_quantity(), expected);
        assert_eq!(
            category.to_summary_string(),
            format!("Смартфоны, количество продуктов: {} шт.", expected)
        );
    }

    #[test]
    fn test_combine_borrows_other_category() {
        let a = isolated(vec![product(100.0, 10)]);
        let b = isolated(vec![product(100.0, 10), product(200.0, 2)]);

        assert_eq!(a.combine_value(&b).unwrap(), 2400.0);
        // `b` is still ours after combining
        assert_eq!(b.len(), 2);

        let err = a.combine_value(&json!("text")).unwrap_err();
        assert!(
            matches!(err, CoreError::IncompatibleType { ref right, .. } if right == "string")
        );

        let phone = Smartphone::new("S", "", 1.0, 1, "Высокая", "M", 64, "Черный").unwrap();
        let err = a.combine_value(&phone).unwrap_err();
        assert!(
            matches!(err, CoreError::IncompatibleType { ref right, .. } if right == "Smartphone")
        );
    }

    #[test]
    fn test_summary_format_from_str() {
        assert_eq!("LEGACY".parse::<SummaryFormat>().unwrap(), SummaryFormat::Legacy);
        assert!("short".parse::<SummaryFormat>().is_err());
    }

    #[test]
    fn test_catalog_value_type_names() {
        assert_eq!(CatalogValue::from(product(1.0, 1)).type_name(), "Product");
        assert_eq!(CatalogValue::from(json!(null)).type_name(), "null");
        assert_eq!(CatalogValue::from(Vec::<AnyProduct>::new()).type_name(), "list");
        assert!(CatalogValue::from(product(1.0, 1)).is_product());
    }
}
