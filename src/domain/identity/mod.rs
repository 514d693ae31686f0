pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::{AuthenticatedUser, Role};
pub use errors::IdentityError;
pub use ports::IdentityResolver;
