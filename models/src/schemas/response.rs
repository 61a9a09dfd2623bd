use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
}
