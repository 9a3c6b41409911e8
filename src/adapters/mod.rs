// Adapters layer: concrete implementations for storage, the stock service and notices.

pub mod http;
pub mod notify;
pub mod storage;

pub use http::HttpStockClient;
pub use notify::{ChannelNotifier, ConsoleNotifier};
pub use storage::{CartSnapshotStore, LocalStorage, MemoryStorage, CART_STORAGE_KEY};
