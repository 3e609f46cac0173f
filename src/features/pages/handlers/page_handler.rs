use axum::{
    extract::{Path, State},
    response::Html,
};
use minijinja::context;

use crate::core::error::Result;
use crate::core::extractor::AppForm;
use crate::core::state::AppState;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::handlers::render_category;
use crate::features::categories::models::Category;
use crate::features::pages::dtos::PageFormDto;
use crate::features::pages::services::CreatePageOutcome;
use crate::shared::forms::FormErrors;

#[utoipa::path(
    get,
    path = "/category/{slug}/add_page",
    params(
        ("slug" = String, Path, description = "Slug of the category the page belongs to")
    ),
    responses(
        (status = 200, description = "Empty add page form", content_type = "text/html", body = String),
        (status = 303, description = "Not logged in; redirect to the login page"),
    ),
    security(("session_cookie" = [])),
    tag = "pages"
)]
pub async fn add_page_form(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(slug): Path<String>,
) -> Result<Html<String>> {
    let category = state.categories.get_by_slug(&slug).await?;
    render_form(
        &state,
        &user,
        category.as_ref(),
        &PageFormDto::default(),
        &FormErrors::new(),
    )
}

/// Add a page to a category
///
/// On success the category page is rendered. When the category does not
/// exist nothing is saved and the form is shown again.
#[utoipa::path(
    post,
    path = "/category/{slug}/add_page",
    params(
        ("slug" = String, Path, description = "Slug of the category the page belongs to")
    ),
    request_body(
        content = PageFormDto,
        content_type = "application/x-www-form-urlencoded",
    ),
    responses(
        (status = 200, description = "Category page, or the form with errors", content_type = "text/html", body = String),
        (status = 303, description = "Not logged in; redirect to the login page"),
    ),
    security(("session_cookie" = [])),
    tag = "pages"
)]
pub async fn add_page(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(slug): Path<String>,
    AppForm(form): AppForm<PageFormDto>,
) -> Result<Html<String>> {
    let form = form.cleaned();
    let category = state.categories.get_by_slug(&slug).await?;

    let errors = match &category {
        Some(category) => match state.pages.create(category, &form).await? {
            CreatePageOutcome::Created(_) => {
                return render_category(&state, Some(&user), &slug).await;
            }
            CreatePageOutcome::Invalid(errors) => errors,
        },
        None => {
            tracing::warn!("Page not added: category '{}' does not exist", slug);
            state.pages.validate(&form)
        }
    };

    if !errors.is_empty() {
        tracing::warn!("Invalid page form: {}", errors);
    }
    render_form(&state, &user, category.as_ref(), &form, &errors)
}

fn render_form(
    state: &AppState,
    user: &AuthenticatedUser,
    category: Option<&Category>,
    form: &PageFormDto,
    errors: &FormErrors,
) -> Result<Html<String>> {
    state.render(
        "rango/add_page.html",
        context! {
            user => user,
            category => category,
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
    async fn test_add_page_requires_login() {
        let app = TestApp::new();
        app.store.add_category("Python", 0);

        let response = app
            .server
            .post("/category/python/add_page")
            .form(&[("title", "Docs"), ("url", "docs.python.org")])
            .await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.header(header::LOCATION).to_str().unwrap(),
            "/login?next=%2Fcategory%2Fpython%2Fadd_page"
        );
        assert_eq!(app.store.page_count(), 0);
    }

    #[tokio::test]
    async fn test_add_page_form_names_the_category() {
        let app = TestApp::new();
        app.store.add_category("Python", 0);
        let cookie = app.logged_in("jane").await;

        let response = app
            .server
            .get("/category/python/add_page")
            .add_header(header::COOKIE, cookie)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.text().contains("Add a Page to Python"));
    }

    #[tokio::test]
    async fn test_add_page_renders_category_on_success() {
        let app = TestApp::new();
        let python = app.store.add_category("Python", 0);
        let cookie = app.logged_in("jane").await;

        let response = app
            .server
            .post("/category/python/add_page")
            .add_header(header::COOKIE, cookie)
            .form(&[("title", " Official Tutorial "), ("url", "docs.python.org")])
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.text();
        assert!(body.contains("<h1>Python</h1>"));
        assert!(body.contains("Official Tutorial"));

        let pages = app.store.pages_of(python.id);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Official Tutorial");
        assert_eq!(pages[0].url, "http://docs.python.org");
        assert_eq!(pages[0].views, 0);
    }

    #[tokio::test]
    async fn test_add_page_to_missing_category_creates_nothing() {
        let app = TestApp::new();
        let cookie = app.logged_in("jane").await;

        let response = app
            .server
            .post("/category/ghost/add_page")
            .add_header(header::COOKIE, cookie)
            .form(&[("title", "Docs"), ("url", "http://example.com")])
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response
            .text()
            .contains("The specified category does not exist!"));
        assert_eq!(app.store.page_count(), 0);
    }

    #[tokio::test]
    async fn test_add_page_with_invalid_form_shows_errors() {
        let app = TestApp::new();
        app.store.add_category("Python", 0);
        let cookie = app.logged_in("jane").await;

        let response = app
            .server
            .post("/category/python/add_page")
            .add_header(header::COOKIE, cookie)
            .form(&[("title", ""), ("url", "not a url")])
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.text();
        assert!(body.contains("Enter a title of 1 to 128 characters."));
        assert!(body.contains("Enter a valid URL."));
        assert_eq!(app.store.page_count(), 0);
    }
}
