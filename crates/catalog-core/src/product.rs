//! # Products
//!
//! The product capability contract and its three implementations.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product Types                                   │
//! │                                                                         │
//! │                    trait BaseProduct                                    │
//! │           price · quantity · display · debug_repr · factory             │
//! │                              │                                          │
//! │        ┌─────────────────────┼─────────────────────┐                    │
//! │        ▼                     ▼                     ▼                    │
//! │  ┌────────────┐      ┌──────────────┐      ┌──────────────┐            │
//! │  │  Product   │      │  Smartphone  │      │  LawnGrass   │            │
//! │  │  ────────  │      │  ──────────  │      │  ──────────  │            │
//! │  │  core      │      │  core        │      │  core        │            │
//! │  │            │      │  efficiency  │      │  country     │            │
//! │  │            │      │  model       │      │  germination │            │
//! │  │            │      │  memory      │      │  color       │            │
//! │  │            │      │  color       │      │              │            │
//! │  └────────────┘      └──────────────┘      └──────────────┘            │
//! │                                                                         │
//! │  AnyProduct = Product | Smartphone | LawnGrass  (what categories hold)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ProductCore` carries the shared fields (id, name, description, price,
//! quantity) so every variant validates them the same way.
//!
//! ## Example
//! ```rust
//! use catalog_core::product::{BaseProduct, Smartphone};
//!
//! let phone = Smartphone::new(
//!     "Iphone 15", "512GB, Gray space", 210000.0, 8,
//!     "Высокая", "15", 512, "Серый",
//! ).unwrap();
//!
//! assert_eq!(
//!     phone.to_display_string(),
//!     "Iphone 15 15, 210000.0 руб. Остаток: 8 шт. (Цвет: Серый, Память: 512GB, Эффективность: Высокая)"
//! );
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use tracing::warn;
use uuid::Uuid;

use crate::config::ConfigError;
use crate::error::{CoreError, CoreResult};
use crate::observer;
use crate::price::{format_price, Price};
use crate::validation::validate_quantity;

/// Field-name → value mapping accepted by the named-field factory.
pub type FieldMap = Map<String, Value>;

// =============================================================================
// Product Kind
// =============================================================================

/// The concrete type behind a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Product,
    Smartphone,
    LawnGrass,
}

impl ProductKind {
    /// Type name as it appears in `debug_repr()` and error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            ProductKind::Product => "Product",
            ProductKind::Smartphone => "Smartphone",
            ProductKind::LawnGrass => "LawnGrass",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// =============================================================================
// Combine Mode
// =============================================================================

/// How strictly `combine_value` matches the two operands.
///
/// ```text
/// Exact  (default)   Smartphone + Smartphone  ✅
///                    Smartphone + LawnGrass   ❌ IncompatibleType
///
/// Family             Smartphone + LawnGrass   ✅ (both are products)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    /// Both operands must be the same concrete type.
    #[default]
    Exact,

    /// Any two products combine.
    Family,
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineMode::Exact => write!(f, "exact"),
            CombineMode::Family => write!(f, "family"),
        }
    }
}

impl FromStr for CombineMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" | "strict" => Ok(CombineMode::Exact),
            "family" | "base" => Ok(CombineMode::Family),
            other => Err(ConfigError::InvalidValue {
                key: "combine mode".to_string(),
                value: other.to_string(),
                expected: "exact, family",
            }),
        }
    }
}

// =============================================================================
// Product Core
// =============================================================================

/// Fields shared by every product variant.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCore {
    id: Uuid,
    name: String,
    description: String,
    price: Price,
    quantity: i64,
}

impl ProductCore {
    /// Validates and assembles the shared fields.
    ///
    /// Name and description are free text; any string is accepted.
    ///
    /// ## Errors
    /// - `InvalidQuantity` when `quantity <= 0`
    /// - `InvalidPrice` when `price <= 0` or not finite
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        let price = Price::new(price)?;

        Ok(ProductCore {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        })
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

    pub fn price(&self) -> f64 {
        self.price.value()
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `"{name}, {price} руб. Остаток: {quantity} шт."` with an optional
    /// suffix glued to the name (the smartphone model).
    fn write_listing(&self, f: &mut fmt::Formatter<'_>, name_suffix: Option<&str>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(suffix) = name_suffix {
            write!(f, " {}", suffix)?;
        }
        write!(f, ", {} руб. Остаток: {} шт.", self.price, self.quantity)
    }

    /// Leading `debug_repr` arguments: `'name', 'description', price, quantity`.
    fn repr_args(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            quote(&self.name),
            quote(&self.description),
            format_price(self.price.value()),
            self.quantity
        )
    }
}

/// Single-quotes a text argument for `debug_repr`.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for ch in text.chars() {
        if ch == '\'' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

// =============================================================================
// Capability Contract
// =============================================================================

/// What every product supports, whatever its concrete type.
///
/// Categories only rely on this trait, so any variant can be stored,
/// displayed and aggregated the same way.
pub trait BaseProduct: fmt::Display + fmt::Debug {
    /// Shared fields.
    fn core(&self) -> &ProductCore;

    /// Shared fields, mutably. Only the price is ever changed through it.
    fn core_mut(&mut self) -> &mut ProductCore;

    /// Concrete type of this product.
    fn kind(&self) -> ProductKind;

    /// `Kind('text', 'text', number, ...)` listing every constructor argument
    /// in declared order.
    fn debug_repr(&self) -> String;

    /// Named-field factory: builds the concrete type from a field map.
    ///
    /// The map must hold exactly the constructor's fields.
    fn new_product(fields: &FieldMap) -> CoreResult<Self>
    where
        Self: Sized;

    fn id(&self) -> Uuid {
        self.core().id()
    }

    fn name(&self) -> &str {
        self.core().name()
    }

    fn description(&self) -> &str {
        self.core().description()
    }

    fn price(&self) -> f64 {
        self.core().price()
    }

    /// Updates the price when `value` is finite and `> 0`.
    ///
    /// A rejected value is logged and the old price is kept; this never
    /// fails. Returns whether the new price was applied. `NaN` and the
    /// infinities are refused with their own message.
    fn set_price(&mut self, value: f64) -> bool {
        match Price::new(value) {
            Ok(price) => {
                self.core_mut().price = price;
                true
            }
            Err(err) => {
                warn!(
                    product = %self.name(),
                    value,
                    error = %err,
                    "{}",
                    price_rejection(value)
                );
                false
            }
        }
    }

    fn quantity(&self) -> i64 {
        self.core().quantity()
    }

    /// The quantity, for "how many of this are there" queries.
    fn quantity_as_length(&self) -> i64 {
        self.quantity()
    }

    fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// `price * quantity`.
    fn stock_value(&self) -> f64 {
        self.core().price * self.quantity()
    }

    /// Sums both products' stock values; the concrete types must match.
    fn combine_value(&self, other: &dyn BaseProduct) -> CoreResult<f64> {
        self.combine_value_with(other, CombineMode::default())
    }

    /// Like [`BaseProduct::combine_value`] with an explicit strictness.
    fn combine_value_with(&self, other: &dyn BaseProduct, mode: CombineMode) -> CoreResult<f64> {
        if mode == CombineMode::Exact && self.kind() != other.kind() {
            return Err(CoreError::IncompatibleType {
                left: self.kind().to_string(),
                right: other.kind().to_string(),
            });
        }

        Ok(self.stock_value() + other.stock_value())
    }
}

/// Log line for a price the setter refuses.
fn price_rejection(value: f64) -> &'static str {
    if value.is_finite() {
        "Цена не должна быть нулевая или отрицательная"
    } else {
        "Цена должна быть конечным числом"
    }
}

/// Deserializes a field map into a constructor argument struct.
fn parse_fields<T: DeserializeOwned>(kind: ProductKind, fields: &FieldMap) -> CoreResult<T> {
    serde_json::from_value(Value::Object(fields.clone())).map_err(|err| {
        CoreError::InvalidFields {
            kind: kind.to_string(),
            reason: err.to_string(),
        }
    })
}

// =============================================================================
// Product
// =============================================================================

/// A plain catalog item.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    #[serde(flatten)]
    core: ProductCore,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProductFields {
    name: String,
    description: String,
    price: f64,
    quantity: i64,
}

impl Product {
    /// Creates a product.
    ///
    /// ## Errors
    /// `InvalidQuantity` for `quantity <= 0`, `InvalidPrice` for `price <= 0`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> CoreResult<Self> {
        let product = Product {
            core: ProductCore::new(name, description, price, quantity)?,
        };
        observer::notify(ProductKind::Product, &product.debug_repr());
        Ok(product)
    }
}

impl BaseProduct for Product {
    fn core(&self) -> &ProductCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProductCore {
        &mut self.core
    }

    fn kind(&self) -> ProductKind {
        ProductKind::Product
    }

    fn debug_repr(&self) -> String {
        format!("Product({})", self.core.repr_args())
    }

    fn new_product(fields: &FieldMap) -> CoreResult<Self> {
        let f: ProductFields = parse_fields(ProductKind::Product, fields)?;
        Product::new(f.name, f.description, f.price, f.quantity)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.write_listing(f, None)
    }
}

// =============================================================================
// Smartphone
// =============================================================================

/// A smartphone with model, storage and color.
#[derive(Debug, Clone, Serialize)]
pub struct Smartphone {
    #[serde(flatten)]
    core: ProductCore,
    efficiency: String,
    model: String,
    /// Storage capacity in GB.
    memory: u32,
    color: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SmartphoneFields {
    name: String,
    description: String,
    price: f64,
    quantity: i64,
    efficiency: String,
    model: String,
    memory: u32,
    color: String,
}

impl Smartphone {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
        efficiency: impl Into<String>,
        model: impl Into<String>,
        memory: u32,
        color: impl Into<String>,
    ) -> CoreResult<Self> {
        let phone = Smartphone {
            core: ProductCore::new(name, description, price, quantity)?,
            efficiency: efficiency.into(),
            model: model.into(),
            memory,
            color: color.into(),
        };
        observer::notify(ProductKind::Smartphone, &phone.debug_repr());
        Ok(phone)
    }

    pub fn efficiency(&self) -> &str {
        &self.efficiency
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn memory(&self) -> u32 {
        self.memory
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

impl BaseProduct for Smartphone {
    fn core(&self) -> &ProductCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProductCore {
        &mut self.core
    }

    fn kind(&self) -> ProductKind {
        ProductKind::Smartphone
    }

    fn debug_repr(&self) -> String {
        format!(
            "Smartphone({}, {}, {}, {}, {})",
            self.core.repr_args(),
            quote(&self.efficiency),
            quote(&self.model),
            self.memory,
            quote(&self.color)
        )
    }

    fn new_product(fields: &FieldMap) -> CoreResult<Self> {
        let f: SmartphoneFields = parse_fields(ProductKind::Smartphone, fields)?;
        Smartphone::new(
            f.name,
            f.description,
            f.price,
            f.quantity,
            f.efficiency,
            f.model,
            f.memory,
            f.color,
        )
    }
}

impl fmt::Display for Smartphone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.write_listing(f, Some(self.model.as_str()))?;
        write!(
            f,
            " (Цвет: {}, Память: {}GB, Эффективность: {})",
            self.color, self.memory, self.efficiency
        )
    }
}

// =============================================================================
// Lawn Grass
// =============================================================================

/// Lawn grass seed with origin and germination period.
#[derive(Debug, Clone, Serialize)]
pub struct LawnGrass {
    #[serde(flatten)]
    core: ProductCore,
    country: String,
    /// Days until the seeds sprout.
    germination_period: u32,
    color: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LawnGrassFields {
    name: String,
    description: String,
    price: f64,
    quantity: i64,
    country: String,
    germination_period: u32,
    color: String,
}

impl LawnGrass {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
        country: impl Into<String>,
        germination_period: u32,
        color: impl Into<String>,
    ) -> CoreResult<Self> {
        let grass = LawnGrass {
            core: ProductCore::new(name, description, price, quantity)?,
            country: country.into(),
            germination_period,
            color: color.into(),
        };
        observer::notify(ProductKind::LawnGrass, &grass.debug_repr());
        Ok(grass)
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn germination_period(&self) -> u32 {
        self.germination_period
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

impl BaseProduct for LawnGrass {
    fn core(&self) -> &ProductCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProductCore {
        &mut self.core
    }

    fn kind(&self) -> ProductKind {
        ProductKind::LawnGrass
    }

    fn debug_repr(&self) -> String {
        format!(
            "LawnGrass({}, {}, {}, {})",
            self.core.repr_args(),
            quote(&self.country),
            self.germination_period,
            quote(&self.color)
        )
    }

    fn new_product(fields: &FieldMap) -> CoreResult<Self> {
        let f: LawnGrassFields = parse_fields(ProductKind::LawnGrass, fields)?;
        LawnGrass::new(
            f.name,
            f.description,
            f.price,
            f.quantity,
            f.country,
            f.germination_period,
            f.color,
        )
    }
}

impl fmt::Display for LawnGrass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.write_listing(f, None)?;
        write!(
            f,
            " (Цвет: {}, Страна: {}, Срок прорастания: {} дней)",
            self.color, self.country, self.germination_period
        )
    }
}

// =============================================================================
// Operators
// =============================================================================

// `&a + &b` on two values of the same concrete type. The compiler enforces
// the exact-type rule here, so the result is a plain f64.
macro_rules! impl_stock_add {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Add for &$ty {
                type Output = f64;

                fn add(self, other: Self) -> f64 {
                    self.stock_value() + other.stock_value()
                }
            }
        )*
    };
}

impl_stock_add!(Product, Smartphone, LawnGrass);

// =============================================================================
// Any Product
// =============================================================================

/// Any product variant. This is what a category stores.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnyProduct {
    Product(Product),
    Smartphone(Smartphone),
    LawnGrass(LawnGrass),
}

impl AnyProduct {
    /// Builds the variant named by `kind` from its field map.
    pub fn from_fields(kind: ProductKind, fields: &FieldMap) -> CoreResult<Self> {
        Ok(match kind {
            ProductKind::Product => Product::new_product(fields)?.into(),
            ProductKind::Smartphone => Smartphone::new_product(fields)?.into(),
            ProductKind::LawnGrass => LawnGrass::new_product(fields)?.into(),
        })
    }

    fn as_dyn(&self) -> &dyn BaseProduct {
        match self {
            AnyProduct::Product(p) => p,
            AnyProduct::Smartphone(p) => p,
            AnyProduct::LawnGrass(p) => p,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn BaseProduct {
        match self {
            AnyProduct::Product(p) => p,
            AnyProduct::Smartphone(p) => p,
            AnyProduct::LawnGrass(p) => p,
        }
    }
}

impl BaseProduct for AnyProduct {
    fn core(&self) -> &ProductCore {
        self.as_dyn().core()
    }

    fn core_mut(&mut self) -> &mut ProductCore {
        self.as_dyn_mut().core_mut()
    }

    fn kind(&self) -> ProductKind {
        self.as_dyn().kind()
    }

    fn debug_repr(&self) -> String {
        self.as_dyn().debug_repr()
    }

    /// Reads the variant from a `"kind"` entry; the remaining entries go to
    /// that variant's factory.
    fn new_product(fields: &FieldMap) -> CoreResult<Self> {
        let mut rest = fields.clone();
        let kind = rest.remove("kind").ok_or_else(|| CoreError::InvalidFields {
            kind: "AnyProduct".to_string(),
            reason: "missing field `kind`".to_string(),
        })?;
        let kind: ProductKind =
            serde_json::from_value(kind).map_err(|err| CoreError::InvalidFields {
                kind: "AnyProduct".to_string(),
                reason: err.to_string(),
            })?;

        AnyProduct::from_fields(kind, &rest)
    }
}

impl fmt::Display for AnyProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_dyn(), f)
    }
}

impl From<Product> for AnyProduct {
    fn from(p: Product) -> Self {
        AnyProduct::Product(p)
    }
}

impl From<Smartphone> for AnyProduct {
    fn from(p: Smartphone) -> Self {
        AnyProduct::Smartphone(p)
    }
}

impl From<LawnGrass> for AnyProduct {
    fn from(p: LawnGrass) -> Self {
        AnyProduct::LawnGrass(p)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn fields(value: Value) -> FieldMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    fn samsung() -> Smartphone {
        Smartphone::new(
            "Samsung Galaxy C23 Ultra",
            "256GB, Серый цвет, 200MP камера",
            180000.0,
            5,
            "Высокая",
            "C23 Ultra",
            256,
            "Серый",
        )
        .unwrap()
    }

    fn grass() -> LawnGrass {
        LawnGrass::new("Test3", "Test3", 3000.0, 10, "Россия", 7, "Зеленый").unwrap()
    }

    #[test]
    fn test_product_display() {
        let tv = Product::new("55 QLED 4K", "Фоновая подсветка", 123000.0, 7).unwrap();
        assert_eq!(
            tv.to_display_string(),
            "55 QLED 4K, 123000.0 руб. Остаток: 7 шт."
        );
    }

    #[test]
    fn test_smartphone_display() {
        assert_eq!(
            samsung().to_display_string(),
            "Samsung Galaxy C23 Ultra C23 Ultra, 180000.0 руб. Остаток: 5 шт. \
             (Цвет: Серый, Память: 256GB, Эффективность: Высокая)"
        );
    }

    #[test]
    fn test_lawn_grass_display() {
        assert_eq!(
            grass().to_display_string(),
            "Test3, 3000.0 руб. Остаток: 10 шт. \
             (Цвет: Зеленый, Страна: Россия, Срок прорастания: 7 дней)"
        );
    }

    #[test]
    fn test_construction_rejects_bad_quantity() {
        let err = Product::new("Test", "Test", 1000.0, 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity { quantity: 0 }));

        let err = LawnGrass::new("Grass", "", 10.0, -3, "Россия", 7, "Зеленый").unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity { quantity: -3 }));
    }

    #[test]
    fn test_construction_rejects_bad_price() {
        let err = Product::new("Test", "Test", 0.0, 1).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPrice { .. }));
    }

    #[test]
    fn test_set_price() {
        let mut product = Product::new("Test Product", "Test Description", 1000.0, 10).unwrap();
        assert_eq!(product.price(), 1000.0);

        assert!(product.set_price(800.0));
        assert_eq!(product.price(), 800.0);

        assert!(!product.set_price(-500.0));
        assert_eq!(product.price(), 800.0);

        assert!(!product.set_price(0.0));
        assert_eq!(product.price(), 800.0);
    }

    #[test]
    fn test_set_price_rejects_non_finite() {
        let mut product = Product::new("Test Product", "", 1000.0, 10).unwrap();

        assert!(!product.set_price(f64::INFINITY));
        assert!(!product.set_price(f64::NAN));
        assert_eq!(product.price(), 1000.0);

        assert_eq!(
            price_rejection(-1.0),
            "Цена не должна быть нулевая или отрицательная"
        );
        assert_eq!(price_rejection(f64::INFINITY), "Цена должна быть конечным числом");
        assert_eq!(price_rejection(f64::NAN), "Цена должна быть конечным числом");
    }

    #[test]
    fn test_construction_accepts_any_name() {
        let empty = Product::new("", "d", 10.0, 1).unwrap();
        assert_eq!(empty.name(), "");
        assert_eq!(empty.to_display_string(), ", 10.0 руб. Остаток: 1 шт.");

        assert!(Product::new("   ", "", 10.0, 1).is_ok());

        let long_name = "A".repeat(201);
        let long = Smartphone::new(&long_name, "", 10.0, 1, "Высокая", "X", 64, "Черный").unwrap();
        assert_eq!(long.name(), long_name);
    }

    #[test]
    fn test_quantity_as_length() {
        assert_eq!(samsung().quantity_as_length(), 5);
    }

    #[test]
    fn test_combine_same_type() {
        let a = Product::new("A", "", 100.0, 10).unwrap();
        let b = Product::new("B", "", 200.0, 2).unwrap();

        assert_eq!(a.combine_value(&b).unwrap(), 1400.0);
        assert_eq!(&a + &b, 1400.0);
    }

    #[test]
    fn test_combine_different_types() {
        let phone = samsung();
        let lawn = grass();

        let err = phone.combine_value(&lawn).unwrap_err();
        assert!(matches!(err, CoreError::IncompatibleType { .. }));

        // A plain Product and a Smartphone differ too
        let plain = Product::new("A", "", 100.0, 1).unwrap();
        assert!(plain.combine_value(&phone).is_err());
    }

    #[test]
    fn test_combine_family_mode() {
        let phone = samsung();
        let lawn = grass();

        let total = phone
            .combine_value_with(&lawn, CombineMode::Family)
            .unwrap();
        assert_eq!(total, 180000.0 * 5.0 + 3000.0 * 10.0);
    }

    #[test]
    fn test_combine_through_any_product() {
        let a: AnyProduct = samsung().into();
        let b = samsung();
        assert_eq!(a.combine_value(&b).unwrap(), 2.0 * 900000.0);
    }

    #[test]
    fn test_debug_repr() {
        assert_eq!(
            samsung().debug_repr(),
            "Smartphone('Samsung Galaxy C23 Ultra', '256GB, Серый цвет, 200MP камера', \
             180000.0, 5, 'Высокая', 'C23 Ultra', 256, 'Серый')"
        );
        assert_eq!(
            grass().debug_repr(),
            "LawnGrass('Test3', 'Test3', 3000.0, 10, 'Россия', 7, 'Зеленый')"
        );
        let tv = Product::new("55 QLED 4K", "Фоновая подсветка", 123000.0, 7).unwrap();
        assert_eq!(
            tv.debug_repr(),
            "Product('55 QLED 4K', 'Фоновая подсветка', 123000.0, 7)"
        );
    }

    #[test]
    fn test_debug_repr_escapes_quotes() {
        let p = Product::new("Rock'n'roll", "a\\b", 1.5, 1).unwrap();
        assert_eq!(p.debug_repr(), r"Product('Rock\'n\'roll', 'a\\b', 1.5, 1)");
    }

    #[test]
    fn test_new_product_factory() {
        let phone = Smartphone::new_product(&fields(json!({
            "name": "Iphone 15",
            "description": "512GB, Gray space",
            "price": 210000.0,
            "quantity": 8,
            "efficiency": "Высокая",
            "model": "15",
            "memory": 512,
            "color": "Серый"
        })))
        .unwrap();

        assert_eq!(phone.model(), "15");
        assert_eq!(phone.memory(), 512);
        assert_eq!(phone.price(), 210000.0);
    }

    #[test]
    fn test_new_product_accepts_integer_price() {
        let product = Product::new_product(&fields(json!({
            "name": "Test Product",
            "description": "Test Description",
            "price": 1000,
            "quantity": 10
        })))
        .unwrap();
        assert_eq!(product.price(), 1000.0);
    }

    #[test]
    fn test_new_product_rejects_wrong_fields() {
        let missing = Product::new_product(&fields(json!({
            "name": "Test",
            "description": "Test",
            "price": 1000.0
        })));
        assert!(matches!(missing, Err(CoreError::InvalidFields { .. })));

        let extra = Product::new_product(&fields(json!({
            "name": "Test",
            "description": "Test",
            "price": 1000.0,
            "quantity": 1,
            "color": "Серый"
        })));
        assert!(matches!(extra, Err(CoreError::InvalidFields { .. })));
    }

    #[test]
    fn test_new_product_still_validates() {
        let result = Product::new_product(&fields(json!({
            "name": "Test",
            "description": "Test",
            "price": 1000.0,
            "quantity": 0
        })));
        assert!(matches!(result, Err(CoreError::InvalidQuantity { .. })));
    }

    #[test]
    fn test_any_product_factory_dispatches_on_kind() {
        let product = AnyProduct::new_product(&fields(json!({
            "kind": "lawn_grass",
            "name": "Газон",
            "description": "Элитный",
            "price": 500.0,
            "quantity": 20,
            "country": "Россия",
            "germination_period": 7,
            "color": "Зеленый"
        })))
        .unwrap();
        assert_eq!(product.kind(), ProductKind::LawnGrass);

        let missing_kind = AnyProduct::new_product(&fields(json!({ "name": "x" })));
        assert!(matches!(missing_kind, Err(CoreError::InvalidFields { .. })));
    }

    #[test]
    fn test_combine_mode_from_str() {
        assert_eq!("exact".parse::<CombineMode>().unwrap(), CombineMode::Exact);
        assert_eq!(" Family ".parse::<CombineMode>().unwrap(), CombineMode::Family);
        assert!("loose".parse::<CombineMode>().is_err());
        assert_eq!(CombineMode::default(), CombineMode::Exact);
    }

    #[test]
    fn test_serialize_any_product() {
        let value = serde_json::to_value(AnyProduct::from(grass())).unwrap();
        assert_eq!(value["kind"], "lawn_grass");
        assert_eq!(value["country"], "Россия");
        assert_eq!(value["price"], 3000.0);
    }

    proptest! {
        #[test]
        fn prop_non_positive_price_is_ignored(p in -1.0e9f64..=0.0) {
            let mut product = Product::new("P", "", 42.0, 1).unwrap();
            prop_assert!(!product.set_price(p));
            prop_assert_eq!(product.price(), 42.0);
        }

        #[test]
        fn prop_positive_price_is_applied(p in 1.0e-6f64..1.0e12) {
            let mut product = Product::new("P", "", 42.0, 1).unwrap();
            prop_assert!(product.set_price(p));
            prop_assert_eq!(product.price(), p);
        }
    }
}
