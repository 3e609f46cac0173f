use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::home::handlers as home_handlers;
use crate::features::pages::{dtos as pages_dtos, handlers as pages_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Home
        home_handlers::index,
        home_handlers::about,
        home_handlers::restricted,
        // Categories
        categories_handlers::show_category,
        categories_handlers::add_category_form,
        categories_handlers::add_category,
        // Pages
        pages_handlers::add_page_form,
        pages_handlers::add_page,
        // Auth
        auth_handlers::login_form,
        auth_handlers::login,
        auth_handlers::logout,
        // Users
        users_handlers::register_form,
        users_handlers::register,
    ),
    components(
        schemas(
            categories_dtos::CategoryFormDto,
            pages_dtos::PageFormDto,
            auth_dtos::LoginFormDto,
            users_dtos::RegisterFormDto,
        )
    ),
    tags(
        (name = "home", description = "Index, about and restricted pages"),
        (name = "categories", description = "Browse and add categories"),
        (name = "pages", description = "Add pages to a category"),
        (name = "auth", description = "Login and logout"),
        (name = "users", description = "Registration"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Rango",
        version = "0.1.0",
        description = "HTML endpoints of the Rango link directory",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("sessionid"))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
