use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A saved favorite location belonging to one user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FavoriteLocation {
    /// Unique record id (generated on creation)
    pub id: String,

    /// Owning user id, as issued by the identity provider
    pub user_id: String,

    /// Location name as the user saved it
    pub name: String,

    /// Creation timestamp (unix seconds)
    pub created_at: i64,
}

impl FavoriteLocation {
    pub fn new(user_id: &str, name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Request to save a favorite location
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddFavoriteRequest {
    pub name: String,
}
