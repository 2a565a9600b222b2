//! Bundles service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        bundles::{
            errors::BundlesServiceError,
            models::{Bundle, BundleUpdate, BundleUuid, NewBundle},
            repository::PgBundlesRepository,
        },
        products::models::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgBundlesService {
    db: Db,
    repository: PgBundlesRepository,
}

impl PgBundlesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBundlesRepository::new(),
        }
    }

    /// Rejects bundles whose product list is empty or names unknown products.
    async fn check_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_uuids: &[ProductUuid],
    ) -> Result<(), BundlesServiceError> {
        if product_uuids.is_empty() {
            return Err(BundlesServiceError::InvalidData);
        }

        let known = self.repository.count_known_products(tx, product_uuids).await?;

        let distinct = {
            let mut uuids = product_uuids.to_vec();
            uuids.sort_unstable();
            uuids.dedup();
            uuids.len()
        };

        if usize::try_from(known).is_ok_and(|known| known == distinct) {
            Ok(())
        } else {
            Err(BundlesServiceError::UnknownProduct)
        }
    }
}

#[async_trait]
impl BundlesService for PgBundlesService {
    async fn list_bundles(&self) -> Result<Vec<Bundle>, BundlesServiceError> {
        let mut tx = self.db.begin().await?;

        let bundles = self.repository.list_bundles(&mut tx).await?;

        tx.commit().await?;

        Ok(bundles)
    }

    async fn get_bundle(&self, bundle: BundleUuid) -> Result<Bundle, BundlesServiceError> {
        let mut tx = self.db.begin().await?;

        let bundle = self.repository.get_bundle(&mut tx, bundle).await?;

        tx.commit().await?;

        Ok(bundle)
    }

    async fn create_bundle(&self, bundle: NewBundle) -> Result<Bundle, BundlesServiceError> {
        let mut tx = self.db.begin().await?;

        self.check_products(&mut tx, &bundle.product_uuids).await?;

        let created = self.repository.create_bundle(&mut tx, &bundle).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_bundle(
        &self,
        bundle: BundleUuid,
        update: BundleUpdate,
    ) -> Result<Bundle, BundlesServiceError> {
        let mut tx = self.db.begin().await?;

        self.check_products(&mut tx, &update.product_uuids).await?;

        let updated = self.repository.update_bundle(&mut tx, bundle, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_bundle(&self, bundle: BundleUuid) -> Result<(), BundlesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_bundle(&mut tx, bundle).await?;

        if rows_affected == 0 {
            return Err(BundlesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BundlesService: Send + Sync {
    /// Retrieves all bundles, newest first.
    async fn list_bundles(&self) -> Result<Vec<Bundle>, BundlesServiceError>;

    /// Retrieve a single bundle.
    async fn get_bundle(&self, bundle: BundleUuid) -> Result<Bundle, BundlesServiceError>;

    /// Creates a new bundle after validating its product list.
    async fn create_bundle(&self, bundle: NewBundle) -> Result<Bundle, BundlesServiceError>;

    /// Updates a bundle with the given UUID.
    async fn update_bundle(
        &self,
        bundle: BundleUuid,
        update: BundleUpdate,
    ) -> Result<Bundle, BundlesServiceError>;

    /// Deletes a bundle with the given UUID.
    async fn delete_bundle(&self, bundle: BundleUuid) -> Result<(), BundlesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_bundle(products: Vec<ProductUuid>) -> NewBundle {
        NewBundle {
            uuid: BundleUuid::new(),
            title: "Movie Night Box".to_string(),
            category: "Party".to_string(),
            description: "A little of everything".to_string(),
            image: "https://cdn.example.com/bundles/movie-night.jpg".to_string(),
            price: 24_99,
            product_uuids: products,
        }
    }

    #[tokio::test]
    async fn create_bundle_with_known_products() -> TestResult {
        let ctx = TestContext::new().await;

        let a = ctx
            .products
            .create_product(ctx.new_product("Popcorn", 3_00, 9).await?)
            .await?;
        let b = ctx
            .products
            .create_product(ctx.new_product("Soda Chews", 2_00, 9).await?)
            .await?;

        let bundle = ctx
            .bundles
            .create_bundle(new_bundle(vec![a.product.uuid, b.product.uuid]))
            .await?;

        assert_eq!(bundle.price, 24_99);
        assert_eq!(bundle.product_uuids.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn create_bundle_with_unknown_product_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .bundles
            .create_bundle(new_bundle(vec![ProductUuid::new()]))
            .await;

        assert!(
            matches!(result, Err(BundlesServiceError::UnknownProduct)),
            "expected UnknownProduct, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_bundle_with_no_products_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.bundles.create_bundle(new_bundle(Vec::new())).await;

        assert!(
            matches!(result, Err(BundlesServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_bundle_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let a = ctx
            .products
            .create_product(ctx.new_product("Toffee", 4_50, 7).await?)
            .await?;

        let bundle = ctx
            .bundles
            .create_bundle(new_bundle(vec![a.product.uuid]))
            .await?;

        ctx.bundles.delete_bundle(bundle.uuid).await?;

        let result = ctx.bundles.get_bundle(bundle.uuid).await;

        assert!(
            matches!(result, Err(BundlesServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
