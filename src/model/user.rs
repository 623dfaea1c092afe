use serde::{Deserialize, Serialize};

use crate::model::role::Role;

/// Authenticated user as returned by POST /login and as persisted by the
/// client session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub token: String,
}
