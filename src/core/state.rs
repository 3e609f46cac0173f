use axum::response::Html;
use minijinja::Value;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::services::AuthService;
use crate::features::categories::services::CategoryService;
use crate::features::pages::services::PageService;
use crate::features::users::services::UserService;
use crate::shared::templates::Templates;

/// Services and the template environment shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub templates: Arc<Templates>,
    pub categories: Arc<CategoryService>,
    pub pages: Arc<PageService>,
    pub users: Arc<UserService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn render(&self, name: &str, ctx: Value) -> Result<Html<String>> {
        self.templates.render(name, ctx)
    }
}
