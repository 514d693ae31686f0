use std::sync::Arc;
use uuid::Uuid;

use crate::domain::catalog::{ProductRepository, Quantity};

use super::entities::{CartLine, CartMutation};
use super::errors::CartError;
use super::ports::CartStore;

/// Cart operations with catalog-aware validation. Stock sufficiency here is
/// advisory only (the authoritative check happens at placement); it exists so
/// a user cannot cart more units than the shop could possibly deliver.
pub struct CartService {
  cart_store: Arc<dyn CartStore>,
  product_repo: Arc<dyn ProductRepository>,
}

impl CartService {
  pub fn new(cart_store: Arc<dyn CartStore>, product_repo: Arc<dyn ProductRepository>) -> Self {
    Self {
      cart_store,
      product_repo,
    }
  }

  pub async fn list(&self, user_id: Uuid) -> Result<Vec<CartLine>, CartError> {
    self.cart_store.list(user_id).await
  }

  pub async fn add(
    &self,
    user_id: Uuid,
    product_id: Uuid,
    count: i64,
  ) -> Result<CartLine, CartError> {
    let count = Quantity::new(count)?.value();

    let product = self
      .product_repo
      .find_by_id(product_id)
      .await
      .map_err(|e| CartError::Internal(format!("Failed to fetch product: {}", e)))?
      .ok_or(CartError::ProductNotFound(product_id))?;

    if !product.is_orderable() {
      return Err(CartError::ProductUnavailable(product_id));
    }

    let already_carted = self
      .cart_store
      .list(user_id)
      .await?
      .into_iter()
      .find(|line| line.product_id == product_id)
      .map(|line| line.count)
      .unwrap_or(0);

    if !product.has_stock_for(already_carted + count) {
      return Err(CartError::InsufficientStock {
        product_id,
        available: product.stock,
      });
    }

    self.cart_store.add(user_id, product_id, count).await
  }

  pub async fn reduce(
    &self,
    user_id: Uuid,
    product_id: Uuid,
    count: i64,
  ) -> Result<CartMutation, CartError> {
    let count = Quantity::new(count)?.value();
    self.cart_store.reduce(user_id, product_id, count).await
  }

  pub async fn clear(&self, user_id: Uuid) -> Result<(), CartError> {
    self.cart_store.clear(user_id).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::catalog::{CatalogError, Money, Product, ProductName};
  use async_trait::async_trait;
  use chrono::Utc;
  use std::collections::HashMap;
  use std::sync::Mutex;

  struct InMemoryCatalog {
    products: Mutex<HashMap<Uuid, Product>>,
  }

  impl InMemoryCatalog {
    fn with_product(product: Product) -> Arc<Self> {
      let mut products = HashMap::new();
      products.insert(product.id, product);
      Arc::new(Self {
        products: Mutex::new(products),
      })
    }
  }

  #[async_trait]
  impl ProductRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogError> {
      Ok(self.products.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, CatalogError> {
      let products = self.products.lock().unwrap();
      Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn decrement_stock(&self, id: Uuid, count: i64) -> Result<i64, CatalogError> {
      let mut products = self.products.lock().unwrap();
      let product = products
        .get_mut(&id)
        .ok_or(CatalogError::ProductNotFound(id))?;
      if product.stock < count {
        return Err(CatalogError::InsufficientStock {
          product_id: id,
          available: product.stock,
        });
      }
      product.stock -= count;
      Ok(product.stock)
    }

    async fn increment_stock(&self, id: Uuid, count: i64) -> Result<i64, CatalogError> {
      let mut products = self.products.lock().unwrap();
      let product = products
        .get_mut(&id)
        .ok_or(CatalogError::ProductNotFound(id))?;
      product.stock += count;
      Ok(product.stock)
    }
  }

  #[derive(Default)]
  struct InMemoryCartStore {
    lines: Mutex<HashMap<(Uuid, Uuid), i64>>,
  }

  #[async_trait]
  impl CartStore for InMemoryCartStore {
    async fn list(&self, user_id: Uuid) -> Result<Vec<CartLine>, CartError> {
      let lines = self.lines.lock().unwrap();
      Ok(
        lines
          .iter()
          .filter(|((user, _), _)| *user == user_id)
          .map(|((user, product), count)| CartLine {
            user_id: *user,
            product_id: *product,
            count: *count,
            updated_at: Utc::now(),
          })
          .collect(),
      )
    }

    async fn add(
      &self,
      user_id: Uuid,
      product_id: Uuid,
      count: i64,
    ) -> Result<CartLine, CartError> {
      let mut lines = self.lines.lock().unwrap();
      let entry = lines.entry((user_id, product_id)).or_insert(0);
      *entry += count;
      Ok(CartLine {
        user_id,
        product_id,
        count: *entry,
        updated_at: Utc::now(),
      })
    }

    async fn reduce(
      &self,
      user_id: Uuid,
      product_id: Uuid,
      count: i64,
    ) -> Result<CartMutation, CartError> {
      let mut lines = self.lines.lock().unwrap();
      let key = (user_id, product_id);
      let current = *lines.get(&key).ok_or(CartError::LineNotFound(product_id))?;
      if current <= count {
        lines.remove(&key);
        Ok(CartMutation {
          product_id,
          new_count: 0,
          removed: true,
        })
      } else {
        lines.insert(key, current - count);
        Ok(CartMutation {
          product_id,
          new_count: current - count,
          removed: false,
        })
      }
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), CartError> {
      self
        .lines
        .lock()
        .unwrap()
        .retain(|(user, _), _| *user != user_id);
      Ok(())
    }

    async fn reconcile_placed(&self) -> Result<u64, CartError> {
      Ok(0)
    }
  }

  fn test_product(stock: i64) -> Product {
    Product::new(
      ProductName::new("Pear Watch".to_string()).unwrap(),
      Money::new(19900).unwrap(),
      stock,
    )
  }

  fn service_with(product: Product) -> (CartService, Uuid) {
    let product_id = product.id;
    let service = CartService::new(
      Arc::new(InMemoryCartStore::default()),
      InMemoryCatalog::with_product(product),
    );
    (service, product_id)
  }

  #[tokio::test]
  async fn add_sums_into_existing_line() {
    let (service, product_id) = service_with(test_product(10));
    let user_id = Uuid::new_v4();

    service.add(user_id, product_id, 2).await.unwrap();
    let line = service.add(user_id, product_id, 3).await.unwrap();
    assert_eq!(line.count, 5);
  }

  #[tokio::test]
  async fn add_rejects_more_than_stock() {
    let (service, product_id) = service_with(test_product(4));
    let user_id = Uuid::new_v4();

    service.add(user_id, product_id, 3).await.unwrap();
    let err = service.add(user_id, product_id, 2).await.unwrap_err();
    match err {
      CartError::InsufficientStock {
        available,
        product_id: failed,
      } => {
        assert_eq!(available, 4);
        assert_eq!(failed, product_id);
      }
      other => panic!("Expected InsufficientStock, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn add_rejects_unknown_product() {
    let (service, _) = service_with(test_product(4));
    let err = service
      .add(Uuid::new_v4(), Uuid::new_v4(), 1)
      .await
      .unwrap_err();
    assert!(matches!(err, CartError::ProductNotFound(_)));
  }

  #[tokio::test]
  async fn reduce_removes_line_at_zero() {
    let (service, product_id) = service_with(test_product(10));
    let user_id = Uuid::new_v4();

    service.add(user_id, product_id, 2).await.unwrap();
    let mutation = service.reduce(user_id, product_id, 2).await.unwrap();
    assert!(mutation.removed);
    assert_eq!(mutation.new_count, 0);
    assert!(service.list(user_id).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn reduce_keeps_line_above_zero() {
    let (service, product_id) = service_with(test_product(10));
    let user_id = Uuid::new_v4();

    service.add(user_id, product_id, 5).await.unwrap();
    let mutation = service.reduce(user_id, product_id, 2).await.unwrap();
    assert!(!mutation.removed);
    assert_eq!(mutation.new_count, 3);
  }

  #[tokio::test]
  async fn clear_is_idempotent() {
    let (service, product_id) = service_with(test_product(10));
    let user_id = Uuid::new_v4();

    service.add(user_id, product_id, 1).await.unwrap();
    service.clear(user_id).await.unwrap();
    service.clear(user_id).await.unwrap();
    assert!(service.list(user_id).await.unwrap().is_empty());
  }
}
