pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{CartLine, CartMutation};
pub use errors::CartError;
pub use ports::CartStore;
pub use services::CartService;
