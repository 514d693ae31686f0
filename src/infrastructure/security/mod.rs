mod signed_token;

pub use signed_token::SignedTokenIdentity;
