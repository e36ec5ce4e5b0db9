//! Wishlist membership with optimistic toggles

use std::sync::{Arc, Mutex, MutexGuard};

use indexmap::IndexSet;

use crate::{api::wishlist::WishlistApi, error::ClientResult};

#[derive(Clone)]
pub struct Wishlist {
    api: WishlistApi,
    ids: Arc<Mutex<IndexSet<i64>>>,
}

impl Wishlist {
    pub fn new(api: WishlistApi) -> Self {
        Self {
            api,
            ids: Arc::new(Mutex::new(IndexSet::new())),
        }
    }

    /// Replace local membership with the server's
    pub async fn load(&self) -> ClientResult<usize> {
        let ids = self.api.list().await?;
        let mut local = self.ids();
        *local = ids.into_iter().collect();
        Ok(local.len())
    }

    pub fn contains(&self, clothing_id: i64) -> bool {
        self.ids().contains(&clothing_id)
    }

    pub fn clothing_ids(&self) -> Vec<i64> {
        self.ids().iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    pub async fn add(&self, clothing_id: i64) -> ClientResult<()> {
        if !self.ids().insert(clothing_id) {
            return Ok(());
        }
        if let Err(e) = self.api.add(clothing_id).await {
            tracing::warn!("Adding #{} to wishlist failed, reverting: {}", clothing_id, e);
            self.ids().shift_remove(&clothing_id);
            return Err(e);
        }
        Ok(())
    }

    pub async fn remove(&self, clothing_id: i64) -> ClientResult<()> {
        let Some(position) = self.ids().shift_remove_full(&clothing_id).map(|(i, _)| i) else {
            return Ok(());
        };
        if let Err(e) = self.api.remove(clothing_id).await {
            tracing::warn!("Removing #{} from wishlist failed, reverting: {}", clothing_id, e);
            let mut ids = self.ids();
            let (index, _) = ids.insert_full(clothing_id);
            if position < ids.len() {
                ids.move_index(index, position);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Flip membership; returns whether the item is now on the wishlist
    pub async fn toggle(&self, clothing_id: i64) -> ClientResult<bool> {
        if self.contains(clothing_id) {
            self.remove(clothing_id).await?;
            Ok(false)
        } else {
            self.add(clothing_id).await?;
            Ok(true)
        }
    }

    pub async fn clear(&self) -> ClientResult<()> {
        let previous = std::mem::take(&mut *self.ids());
        if let Err(e) = self.api.clear().await {
            tracing::warn!("Clearing wishlist failed, reverting: {}", e);
            *self.ids() = previous;
            return Err(e);
        }
        Ok(())
    }

    fn ids(&self) -> MutexGuard<'_, IndexSet<i64>> {
        self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
