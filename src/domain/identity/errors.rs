use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
  #[error("Malformed identity token")]
  MalformedToken,

  #[error("Identity token signature mismatch")]
  InvalidSignature,

  #[error("Identity token expired")]
  TokenExpired,

  #[error("Unknown role: {0}")]
  UnknownRole(String),
}
