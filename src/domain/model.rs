use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ProductId = u64;

/// Catalog entry as served by `products/{id}`.
///
/// Only `id` is interpreted. Every other field is kept verbatim so that a
/// snapshot written back to storage carries whatever the catalog sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMetadata {
    pub id: ProductId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ProductMetadata {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    pub fn image(&self) -> Option<&str> {
        self.fields.get("image").and_then(Value::as_str)
    }

    /// Accepts a JSON number or a numeric string such as `"139.90"`.
    pub fn price(&self) -> Option<f64> {
        match self.fields.get("price")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// A cart line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub metadata: ProductMetadata,
    pub amount: u32,
}

impl Product {
    /// `amount` owns the quantity; a stray `amount` among the catalog fields is dropped.
    pub fn new(mut metadata: ProductMetadata, amount: u32) -> Self {
        metadata.fields.remove("amount");
        Self { metadata, amount }
    }

    pub fn id(&self) -> ProductId {
        self.metadata.id
    }

    /// Zero when the catalog gave no usable price.
    pub fn subtotal(&self) -> f64 {
        self.metadata.price().unwrap_or(0.0) * f64::from(self.amount)
    }
}

/// Availability as served by `stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: ProductId,
    pub amount: u32,
}

/// Ordered line items, unique by product id.
///
/// The only ways to build a non-empty cart are deserialization and the
/// `with_*` methods, each of which keeps ids unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|product| product.id() == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    /// In-cart quantity, 0 when absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.find(id).map_or(0, |product| product.amount)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|product| u64::from(product.amount)).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(Product::subtotal).sum()
    }

    /// Appends `product`, or replaces the entry that already carries its id.
    pub fn with_product(&self, product: Product) -> Self {
        let mut items = self.items.clone();
        match items.iter_mut().find(|existing| existing.id() == product.id()) {
            Some(existing) => *existing = product,
            None => items.push(product),
        }
        Self { items }
    }

    /// Sets the amount of an existing entry; unknown ids leave the cart as is.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        let items = self
            .items
            .iter()
            .map(|product| {
                if product.id() == id {
                    Product {
                        amount,
                        ..product.clone()
                    }
                } else {
                    product.clone()
                }
            })
            .collect();
        Self { items }
    }

    pub fn without(&self, id: ProductId) -> Self {
        let items = self
            .items
            .iter()
            .filter(|product| product.id() != id)
            .cloned()
            .collect();
        Self { items }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
