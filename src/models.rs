use serde::{Deserialize, Serialize};

use crate::model::role::Role;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub sub: String,
    pub role: Role,
    pub exp: usize,
    pub jti: String,
}
