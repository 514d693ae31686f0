pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;

pub use entities::Product;
pub use errors::CatalogError;
pub use ports::ProductRepository;
pub use value_objects::{Money, ProductName, Quantity, ValueObjectError};
