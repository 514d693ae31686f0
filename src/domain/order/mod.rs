pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::Order;
pub use errors::OrderError;
pub use ports::OrderLedger;
pub use services::{OrderPage, OrderService, PlacedOrder};
pub use value_objects::{OrderSnapshot, OrderStatus, SnapshotLine, StatusPolicy};
