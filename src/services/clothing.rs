//! Clothing catalog browsing and the store's own inventory

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    api::clothing::ClothingApi,
    error::{ClientError, ClientResult},
    models::{clothing::ClothingForm, enums::ClothingStatus, Clothing},
};

/// Browse-page narrowing of the public catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub query: String,
    pub category: Option<String>,
    pub size: Option<String>,
    pub available_only: bool,
}

impl CatalogFilter {
    pub fn matches(&self, clothing: &Clothing) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty()
            && !clothing.item_name.to_lowercase().contains(&query)
            && !clothing
                .store_name
                .as_deref()
                .is_some_and(|store| store.to_lowercase().contains(&query))
        {
            return false;
        }
        if let Some(category) = &self.category {
            if !clothing
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category))
            {
                return false;
            }
        }
        if let Some(size) = &self.size {
            if !clothing.offers_size(size) {
                return false;
            }
        }
        !self.available_only || clothing.clothing_status.is_rentable()
    }

    pub fn apply(&self, catalog: &[Clothing]) -> Vec<Clothing> {
        catalog.iter().filter(|c| self.matches(c)).cloned().collect()
    }
}

/// Listings owned by the signed-in store
#[derive(Clone)]
pub struct StoreInventory {
    api: ClothingApi,
    items: Arc<Mutex<Vec<Clothing>>>,
}

impl StoreInventory {
    pub fn new(api: ClothingApi) -> Self {
        Self {
            api,
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn load(&self) -> ClientResult<usize> {
        let items = self.api.mine().await?;
        let count = items.len();
        *self.items() = items;
        Ok(count)
    }

    pub fn listings(&self) -> Vec<Clothing> {
        self.items().clone()
    }

    pub fn get(&self, id: i64) -> Option<Clothing> {
        self.items().iter().find(|c| c.id == id).cloned()
    }

    pub async fn create(&self, form: &ClothingForm) -> ClientResult<Clothing> {
        let created = self.api.create(form).await?;
        tracing::info!("Listed {} as #{}", created.item_name, created.id);
        self.reload_after("create").await;
        Ok(created)
    }

    pub async fn update(&self, id: i64, form: &ClothingForm) -> ClientResult<Clothing> {
        let updated = self.api.update(id, form).await?;
        self.reload_after("update").await;
        Ok(updated)
    }

    /// Delete a listing; stock and rental links are server-side, so the list is re-read
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete(id).await?;
        tracing::info!("Deleted listing #{}", id);
        self.reload_after("delete").await;
        Ok(())
    }

    /// Flip Available/Unavailable locally, then confirm with the server.
    ///
    /// Returns the new status; the local value is restored if the call fails.
    pub async fn toggle_availability(&self, id: i64) -> ClientResult<ClothingStatus> {
        let (previous, next) = {
            let mut items = self.items();
            let item = items
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| ClientError::NotFound(format!("Listing #{} is not loaded", id)))?;
            if item.clothing_status == ClothingStatus::Rented {
                return Err(ClientError::BadRequest(
                    "A rented item cannot change availability.".to_string(),
                ));
            }
            let previous = item.clothing_status;
            item.clothing_status = previous.toggled();
            (previous, item.clothing_status)
        };

        if let Err(e) = self.api.set_status(id, next).await {
            tracing::warn!("Availability change on #{} failed, reverting: {}", id, e);
            if let Some(item) = self.items().iter_mut().find(|c| c.id == id) {
                item.clothing_status = previous;
            }
            return Err(e);
        }
        Ok(next)
    }

    async fn reload_after(&self, operation: &str) {
        if let Err(e) = self.load().await {
            tracing::warn!("Reloading inventory after {} failed: {}", operation, e);
        }
    }

    fn items(&self) -> MutexGuard<'_, Vec<Clothing>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
