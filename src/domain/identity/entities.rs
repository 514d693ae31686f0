use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::errors::IdentityError;

/// Role carried by an identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Customer,
  Support,
  Admin,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::Customer => "customer",
      Role::Support => "support",
      Role::Admin => "admin",
    }
  }
}

impl FromStr for Role {
  type Err = IdentityError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "customer" => Ok(Role::Customer),
      "support" => Ok(Role::Support),
      "admin" => Ok(Role::Admin),
      _ => Err(IdentityError::UnknownRole(s.to_string())),
    }
  }
}

/// Resolved identity of a request. The token it came from is an opaque
/// credential; once resolved, the claims are trusted as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
  pub user_id: Uuid,
  pub role: Role,
  pub is_admin: bool,
}

impl AuthenticatedUser {
  pub fn new(user_id: Uuid, role: Role, is_admin: bool) -> Self {
    Self {
      user_id,
      role,
      is_admin,
    }
  }

  /// Staff capability: moving orders through the lifecycle.
  pub fn can_progress_orders(&self) -> bool {
    self.is_admin || matches!(self.role, Role::Support | Role::Admin)
  }

  /// Customers see their own orders; staff see everyone's.
  pub fn can_view_orders_of(&self, owner_id: Uuid) -> bool {
    self.user_id == owner_id || self.can_progress_orders()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user(role: Role, is_admin: bool) -> AuthenticatedUser {
    AuthenticatedUser::new(Uuid::new_v4(), role, is_admin)
  }

  #[test]
  fn test_role_parsing() {
    assert_eq!(Role::from_str("support").unwrap(), Role::Support);
    assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
    assert!(Role::from_str("root").is_err());
  }

  #[test]
  fn test_customer_capabilities() {
    let customer = user(Role::Customer, false);
    assert!(!customer.can_progress_orders());
    assert!(customer.can_view_orders_of(customer.user_id));
    assert!(!customer.can_view_orders_of(Uuid::new_v4()));
  }

  #[test]
  fn test_staff_capabilities() {
    let support = user(Role::Support, false);
    assert!(support.can_progress_orders());
    assert!(support.can_view_orders_of(Uuid::new_v4()));

    // Admin flag grants staff capability regardless of role
    let flagged = user(Role::Customer, true);
    assert!(flagged.can_progress_orders());
  }
}
