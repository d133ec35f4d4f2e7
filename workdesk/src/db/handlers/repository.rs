//! Base repository trait for ownership-scoped database operations.

use crate::db::errors::Result;
use crate::types::UserId;

/// Repository trait for per-user resources.
///
/// Every method takes the calling user's identity and the implementation
/// filters by `owner == caller` inside the query itself. A lookup that
/// matches an existing row owned by somebody else therefore behaves
/// exactly like a lookup of a nonexistent id: `get_by_id` and `update`
/// return `None`, `delete` returns `false`.
#[async_trait::async_trait]
pub trait OwnedRepository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// Create a new entity owned by `owner`
    async fn create(&mut self, owner: UserId, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID if it is owned by `owner`
    async fn get_by_id(&mut self, owner: UserId, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List all entities owned by `owner`
    async fn list(&mut self, owner: UserId) -> Result<Vec<Self::Response>>;

    /// Update an entity by ID if it is owned by `owner`; only fields
    /// present in the request are overwritten
    async fn update(&mut self, owner: UserId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>>;

    /// Delete an entity by ID if it is owned by `owner`; returns whether
    /// a row was removed
    async fn delete(&mut self, owner: UserId, id: Self::Id) -> Result<bool>;
}
