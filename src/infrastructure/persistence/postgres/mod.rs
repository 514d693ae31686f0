pub mod cart_repository;
pub mod order_repository;
pub mod product_repository;
mod stock;

pub use cart_repository::PostgresCartStore;
pub use order_repository::PostgresOrderLedger;
pub use product_repository::PostgresProductRepository;
