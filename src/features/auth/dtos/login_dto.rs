use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Submitted login form; absent fields simply fail authentication
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginFormDto {
    #[serde(default)]
    #[schema(example = "jane")]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}
