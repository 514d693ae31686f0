use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::cart::CartStore;
use crate::domain::catalog::ProductRepository;
use crate::domain::identity::AuthenticatedUser;

use super::entities::Order;
use super::errors::OrderError;
use super::ports::OrderLedger;
use super::value_objects::{OrderSnapshot, OrderStatus, StatusPolicy};

/// Receipt handed back to the storefront after placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
  pub order_id: Uuid,
  pub total: crate::domain::catalog::Money,
}

/// One page of a user's order history.
#[derive(Debug, Clone)]
pub struct OrderPage {
  pub orders: Vec<Order>,
  pub total_count: i64,
  pub page: i64,
  pub per_page: i64,
  pub total_pages: i64,
  pub has_next: bool,
  pub has_prev: bool,
}

/// Order lifecycle orchestration: placement from cart contents, status
/// transitions under the [`StatusPolicy`], and read access guarded by the
/// actor's capabilities.
pub struct OrderService {
  orders: Arc<dyn OrderLedger>,
  products: Arc<dyn ProductRepository>,
  cart: Arc<dyn CartStore>,
  policy: StatusPolicy,
}

impl OrderService {
  pub fn new(
    orders: Arc<dyn OrderLedger>,
    products: Arc<dyn ProductRepository>,
    cart: Arc<dyn CartStore>,
    policy: StatusPolicy,
  ) -> Self {
    Self {
      orders,
      products,
      cart,
      policy,
    }
  }

  /// Turns the user's cart into an immutable order.
  ///
  /// Every line is validated against the catalog before anything is
  /// applied; the order row and all stock decrements then commit through
  /// the ledger as one unit. The cart is cleared only after that commit,
  /// so a clear failure leaves a stale cart but never a half-placed order.
  pub async fn place_order(&self, user_id: Uuid) -> Result<PlacedOrder, OrderError> {
    let lines = self.cart.list(user_id).await?;
    if lines.is_empty() {
      return Err(OrderError::EmptyCart);
    }

    let ids: Vec<Uuid> = lines.iter().map(|line| line.product_id).collect();
    let products = self.products.find_by_ids(&ids).await?;

    let mut snapshot_lines = Vec::with_capacity(lines.len());
    for line in &lines {
      let product = products
        .iter()
        .find(|p| p.id == line.product_id)
        .ok_or(OrderError::ProductUnavailable(line.product_id))?;
      if !product.is_orderable() {
        return Err(OrderError::ProductUnavailable(product.id));
      }
      if !product.has_stock_for(line.count) {
        return Err(OrderError::InsufficientStock {
          product_id: product.id,
          available: product.stock,
        });
      }
      // Unit price is the current catalog price, frozen into the snapshot
      snapshot_lines.push((product.id, product.price, line.count));
    }

    let snapshot = OrderSnapshot::from_lines(snapshot_lines)?;
    let order = Order::place(user_id, snapshot)?;
    let placed = self.orders.place(order).await?;

    info!(order_id = %placed.id, user_id = %user_id, total = %placed.total(), "Order placed");

    // Outside the placement unit. A failure here leaves stale cart lines,
    // which the reconciliation pass sweeps up later.
    if let Err(err) = self.cart.clear(user_id).await {
      warn!(order_id = %placed.id, user_id = %user_id, error = %err,
        "Order placed but cart clear failed; cart left for reconciliation");
    }

    Ok(PlacedOrder {
      order_id: placed.id,
      total: placed.total(),
    })
  }

  /// Moves an order to `new_status` if the policy allows it and the actor
  /// may perform it. Cancellation restocks every snapshot line in the same
  /// unit as the status change.
  pub async fn change_status(
    &self,
    actor: &AuthenticatedUser,
    order_id: Uuid,
    new_status: &str,
  ) -> Result<Order, OrderError> {
    let target = OrderStatus::from_str(new_status)?;
    let required = self
      .policy
      .required_predecessor(target)
      .ok_or_else(|| OrderError::UnknownStatus(new_status.to_string()))?;

    let order = self
      .orders
      .find_by_id(order_id)
      .await?
      .ok_or(OrderError::OrderNotFound(order_id))?;

    // Staff move orders forward; the owner may additionally cancel
    let owner_cancelling =
      target == OrderStatus::Cancelled && actor.user_id == order.user_id;
    if !actor.can_progress_orders() && !owner_cancelling {
      return Err(OrderError::PermissionDenied(format!(
        "Not allowed to move order {} to {}",
        order_id, target
      )));
    }

    if order.status != required {
      return Err(OrderError::InvalidTransition {
        current: order.status,
        requested: target,
      });
    }

    let restock = if target == OrderStatus::Cancelled {
      order.items().restock_counts()
    } else {
      Vec::new()
    };

    match self
      .orders
      .transition(order_id, order.status, target, &restock)
      .await?
    {
      Some(updated) => {
        info!(order_id = %order_id, from = %required, to = %target, "Order status changed");
        Ok(updated)
      }
      // A concurrent transition won; report against the fresh status
      None => {
        let current = self
          .orders
          .find_by_id(order_id)
          .await?
          .ok_or(OrderError::OrderNotFound(order_id))?;
        Err(OrderError::InvalidTransition {
          current: current.status,
          requested: target,
        })
      }
    }
  }

  pub async fn get_order(
    &self,
    actor: &AuthenticatedUser,
    order_id: Uuid,
  ) -> Result<Order, OrderError> {
    let order = self
      .orders
      .find_by_id(order_id)
      .await?
      .ok_or(OrderError::OrderNotFound(order_id))?;
    if !actor.can_view_orders_of(order.user_id) {
      return Err(OrderError::PermissionDenied(format!(
        "Not allowed to view order {}",
        order_id
      )));
    }
    Ok(order)
  }

  /// Newest-first page of `owner_id`'s orders. `page` is 1-based.
  pub async fn list_orders(
    &self,
    actor: &AuthenticatedUser,
    owner_id: Uuid,
    page: i64,
    per_page: i64,
  ) -> Result<OrderPage, OrderError> {
    if !actor.can_view_orders_of(owner_id) {
      return Err(OrderError::PermissionDenied(
        "Not allowed to view these orders".to_string(),
      ));
    }
    let page = page.max(1);
    let per_page = per_page.max(1);
    let offset = (page - 1) * per_page;

    let total_count = self.orders.count_by_user(owner_id).await?;
    let orders = self.orders.find_by_user(owner_id, per_page, offset).await?;
    let total_pages = if total_count == 0 {
      0
    } else {
      (total_count + per_page - 1) / per_page
    };

    Ok(OrderPage {
      orders,
      total_count,
      page,
      per_page,
      total_pages,
      has_next: page < total_pages,
      has_prev: page > 1 && total_count > 0,
    })
  }
}
