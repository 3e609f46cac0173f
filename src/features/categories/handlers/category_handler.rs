use axum::{
    extract::{Path, State},
    response::Html,
};
use minijinja::context;

use crate::core::error::Result;
use crate::core::extractor::AppForm;
use crate::core::state::AppState;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::dtos::CategoryFormDto;
use crate::features::categories::services::CreateCategoryOutcome;
use crate::features::home::handlers::render_index;
use crate::shared::forms::FormErrors;

/// Show a category and its pages
///
/// An unknown slug is not an error: the page renders its "no such category" state.
#[utoipa::path(
    get,
    path = "/category/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category page", content_type = "text/html", body = String),
    ),
    tag = "categories"
)]
pub async fn show_category(
    State(state): State<AppState>,
    user: Option<AuthenticatedUser>,
    Path(slug): Path<String>,
) -> Result<Html<String>> {
    render_category(&state, user.as_ref(), &slug).await
}

/// Render the category page for `slug`; also shown after a page is added
pub async fn render_category(
    state: &AppState,
    user: Option<&AuthenticatedUser>,
    slug: &str,
) -> Result<Html<String>> {
    let category = state.categories.get_by_slug(slug).await?;
    let pages = match &category {
        Some(category) => Some(state.pages.list_for_category(category).await?),
        None => {
            tracing::debug!("Category not found: {}", slug);
            None
        }
    };

    state.render(
        "rango/category.html",
        context! {
            user => user,
            category => category,
            pages => pages,
        },
    )
}

#[utoipa::path(
    get,
    path = "/category/add",
    responses(
        (status = 200, description = "Empty add category form", content_type = "text/html", body = String),
        (status = 303, description = "Not logged in; redirect to the login page"),
    ),
    security(("session_cookie" = [])),
    tag = "categories"
)]
pub async fn add_category_form(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Html<String>> {
    render_form(&state, &user, &CategoryFormDto::default(), &FormErrors::new())
}

/// Add a category
///
/// On success the index page is rendered; otherwise the form comes back with errors.
#[utoipa::path(
    post,
    path = "/category/add",
    request_body(
        content = CategoryFormDto,
        content_type = "application/x-www-form-urlencoded",
    ),
    responses(
        (status = 200, description = "Index page, or the form with errors", content_type = "text/html", body = String),
        (status = 303, description = "Not logged in; redirect to the login page"),
    ),
    security(("session_cookie" = [])),
    tag = "categories"
)]
pub async fn add_category(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppForm(form): AppForm<CategoryFormDto>,
) -> Result<Html<String>> {
    let form = form.cleaned();

    match state.categories.create(&form).await? {
        CreateCategoryOutcome::Created(_) => render_index(&state, Some(&user)).await,
        CreateCategoryOutcome::Invalid(errors) => {
            tracing::warn!("Invalid category form: {}", errors);
            render_form(&state, &user, &form, &errors)
        }
    }
}

fn render_form(
    state: &AppState,
    user: &AuthenticatedUser,
    form: &CategoryFormDto,
    errors: &FormErrors,
) -> Result<Html<String>> {
    state.render(
        "rango/add_category.html",
        context! {
            user => user,
            form => form,
            errors => errors,
        },
    )
}

#[cfg(test)]
mod tests {
    use crate::shared::test_helpers::TestApp;
    use axum::http::{header, StatusCode};

    #[tokio::test]
    async fn test_unknown_slug_renders_not_found_state() {
        let app = TestApp::new();

        let response = app.server.get("/category/no-such-thing").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.text();
        assert!(body.contains("The specified category does not exist!"));
        assert!(!body.contains("No pages currently in category."));
    }

    #[tokio::test]
    async fn test_malformed_slug_renders_not_found_state() {
        let app = TestApp::new();
        let response = app.server.get("/category/Not%20A%20Slug").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response
            .text()
            .contains("The specified category does not exist!"));
    }

    #[tokio::test]
    async fn test_show_category_lists_its_pages_in_order_added() {
        let app = TestApp::new();
        let python = app.store.add_category("Python", 64);
        let django = app.store.add_category("Django", 32);
        app.store.add_page(&python, "Official Python Tutorial", 1);
        app.store.add_page(&python, "Learn Python in 10 Minutes", 99);
        app.store.add_page(&django, "Django Rocks", 5);

        let body = app.server.get("/category/python").await.text();

        assert!(body.contains("<h1>Python</h1>"));
        let first = body.find("Official Python Tutorial").unwrap();
        let second = body.find("Learn Python in 10 Minutes").unwrap();
        assert!(first < second);
        assert!(!body.contains("Django Rocks"));
    }

    #[tokio::test]
    async fn test_empty_category() {
        let app = TestApp::new();
        app.store.add_category("Rust", 0);

        let body = app.server.get("/category/rust").await.text();

        assert!(body.contains("No pages currently in category."));
        // The add page link is only offered to logged-in users
        assert!(!body.contains("/category/rust/add_page"));
    }

    #[tokio::test]
    async fn test_add_category_requires_login() {
        let app = TestApp::new();

        let get = app.server.get("/category/add").await;
        assert_eq!(get.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(
            get.header(header::LOCATION).to_str().unwrap(),
            "/login?next=%2Fcategory%2Fadd"
        );

        let post = app
            .server
            .post("/category/add")
            .form(&[("name", "Python")])
            .await;
        assert_eq!(post.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(app.store.category_count(), 0);
    }

    #[tokio::test]
    async fn test_add_category_renders_index_on_success() {
        let app = TestApp::new();
        let cookie = app.logged_in("jane").await;

        let form = app
            .server
            .get("/category/add")
            .add_header(header::COOKIE, cookie.clone())
            .await;
        assert_eq!(form.status_code(), StatusCode::OK);
        assert!(form.text().contains("id=\"category_form\""));

        let response = app
            .server
            .post("/category/add")
            .add_header(header::COOKIE, cookie)
            .form(&[("name", "  Other Frameworks ")])
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.text();
        assert!(body.contains("Most Liked Categories"));
        assert!(body.contains("href=\"/category/other-frameworks\""));
        assert_eq!(app.store.category_count(), 1);
    }

    #[tokio::test]
    async fn test_add_category_rejects_duplicates() {
        let app = TestApp::new();
        app.store.add_category("Python", 0);
        let cookie = app.logged_in("jane").await;

        let response = app
            .server
            .post("/category/add")
            .add_header(header::COOKIE, cookie)
            .form(&[("name", "Python")])
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.text();
        assert!(body.contains("Category with this name already exists."));
        assert!(body.contains("id=\"category_form\""));
        assert_eq!(app.store.category_count(), 1);
    }

    #[tokio::test]
    async fn test_add_category_rejects_invalid_names() {
        let app = TestApp::new();
        let cookie = app.logged_in("jane").await;
        let too_long = "x".repeat(129);

        for name in ["", "   ", "!!!", too_long.as_str()] {
            let response = app
                .server
                .post("/category/add")
                .add_header(header::COOKIE, cookie.clone())
                .form(&[("name", name)])
                .await;

            assert_eq!(response.status_code(), StatusCode::OK);
            assert!(
                response.text().contains("class=\"errorlist\""),
                "no error shown for {:?}",
                name
            );
        }
        assert_eq!(app.store.category_count(), 0);
    }
}
