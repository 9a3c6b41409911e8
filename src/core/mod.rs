pub mod cart;

pub use crate::domain::model::{Cart, Product, ProductId, ProductMetadata, StockRecord};
pub use crate::domain::ports::{ConfigProvider, Notifier, StockApi, Storage};
pub use crate::utils::error::Result;
pub use cart::{CartManager, Notice, Outcome, Rejection};
