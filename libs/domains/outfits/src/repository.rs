use async_trait::async_trait;

use crate::error::OutfitResult;
use crate::models::{ClothingItem, ClothingType};

/// Repository trait for clothing item lookups
///
/// The store is owned elsewhere; this service only reads from it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Get any one item whose `type` equals the given category
    async fn find_one_by_type(&self, item_type: ClothingType)
    -> OutfitResult<Option<ClothingItem>>;

    /// Get an item by its document id
    async fn get_by_id(&self, id: &str) -> OutfitResult<Option<ClothingItem>>;
}
