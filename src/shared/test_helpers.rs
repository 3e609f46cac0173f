//! In-memory repositories and a router harness for handler tests.

use async_trait::async_trait;
use axum::http::HeaderValue;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

use crate::core::config::MediaConfig;
use crate::core::error::{AppError, Result};
use crate::core::router::build_router;
use crate::core::state::AppState;
use crate::features::auth::model::Session;
use crate::features::auth::password::PasswordHasher;
use crate::features::auth::repositories::SessionRepository;
use crate::features::auth::session::SessionCookie;
use crate::features::auth::AuthService;
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;
use crate::features::categories::CategoryService;
use crate::features::pages::models::Page;
use crate::features::pages::repositories::PageRepository;
use crate::features::pages::PageService;
use crate::features::users::models::{User, UserProfile};
use crate::features::users::repositories::UserRepository;
use crate::features::users::UserService;
use crate::modules::storage::MediaStorage;
use crate::shared::templates::Templates;

pub const TEST_MEDIA_URL: &str = "/media";
pub const TEST_MAX_UPLOAD_SIZE: usize = 64 * 1024;

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    pages: Vec<Page>,
    users: Vec<User>,
    profiles: Vec<UserProfile>,
    sessions: Vec<Session>,
}

/// Every repository trait over plain vectors, in insertion order
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn category_count(&self) -> usize {
        self.tables().categories.len()
    }

    pub fn page_count(&self) -> usize {
        self.tables().pages.len()
    }

    pub fn user_count(&self) -> usize {
        self.tables().users.len()
    }

    pub fn profile_count(&self) -> usize {
        self.tables().profiles.len()
    }

    pub fn session_count(&self) -> usize {
        self.tables().sessions.len()
    }

    pub fn user(&self, username: &str) -> Option<User> {
        self.tables()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    pub fn profile_of(&self, user_id: Uuid) -> Option<UserProfile> {
        self.tables()
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
    }

    pub fn pages_of(&self, category_id: Uuid) -> Vec<Page> {
        self.tables()
            .pages
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect()
    }

    pub fn set_active(&self, username: &str, active: bool) {
        for user in self.tables().users.iter_mut() {
            if user.username == username {
                user.is_active = active;
            }
        }
    }

    /// Move every session's expiry to `at`
    pub fn expire_sessions_at(&self, at: DateTime<Utc>) {
        for session in self.tables().sessions.iter_mut() {
            session.expires_at = at;
        }
    }

    pub fn add_category(&self, name: &str, likes: i32) -> Category {
        let mut category = Category::new(name.to_string(), crate::shared::slug::slugify(name));
        category.likes = likes;
        self.tables().categories.push(category.clone());
        category
    }

    pub fn add_page(&self, category: &Category, title: &str, views: i32) -> Page {
        let mut page = Page::new(
            category.id,
            title.to_string(),
            format!("http://example.com/{}", crate::shared::slug::slugify(title)),
        );
        page.views = views;
        self.tables().pages.push(page.clone());
        page
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn top_by_likes(&self, limit: i64) -> Result<Vec<Category>> {
        let mut categories = self.tables().categories.clone();
        categories.sort_by(|a, b| b.likes.cmp(&a.likes));
        categories.truncate(limit.max(0) as usize);
        Ok(categories)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        Ok(self
            .tables()
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn exists_by_name_or_slug(&self, name: &str, slug: &str) -> Result<bool> {
        Ok(self
            .tables()
            .categories
            .iter()
            .any(|c| c.name == name || c.slug == slug))
    }

    async fn insert(&self, category: &Category) -> Result<()> {
        let mut tables = self.tables();
        if tables
            .categories
            .iter()
            .any(|c| c.name == category.name || c.slug == category.slug)
        {
            return Err(AppError::Conflict(
                "Category with this name already exists.".to_string(),
            ));
        }
        tables.categories.push(category.clone());
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.tables().categories.len() as i64)
    }
}

#[async_trait]
impl PageRepository for MemoryStore {
    async fn top_by_views(&self, limit: i64) -> Result<Vec<Page>> {
        let mut pages = self.tables().pages.clone();
        pages.sort_by(|a, b| b.views.cmp(&a.views));
        pages.truncate(limit.max(0) as usize);
        Ok(pages)
    }

    async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Page>> {
        Ok(self.pages_of(category_id))
    }

    async fn insert(&self, page: &Page) -> Result<()> {
        let mut tables = self.tables();
        if !tables.categories.iter().any(|c| c.id == page.category_id) {
            return Err(AppError::Internal(
                "pages.category_id references a missing category".to_string(),
            ));
        }
        tables.pages.push(page.clone());
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.user(username))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        Ok(self.user(username).is_some())
    }

    async fn create_with_profile(&self, user: &User, profile: &UserProfile) -> Result<()> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(
                "A user with that username already exists.".to_string(),
            ));
        }
        tables.users.push(user.clone());
        tables.profiles.push(profile.clone());
        Ok(())
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        Ok(self.profile_of(user_id))
    }

    async fn touch_last_login(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<()> {
        for user in self.tables().users.iter_mut() {
            if user.id == user_id {
                user.last_login = Some(at);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, session: &Session) -> Result<()> {
        self.tables().sessions.push(session.clone());
        Ok(())
    }

    async fn find_active(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<Session>> {
        Ok(self
            .tables()
            .sessions
            .iter()
            .find(|s| s.token_hash == token_hash && s.expires_at > now)
            .cloned())
    }

    async fn delete(&self, token_hash: &str) -> Result<()> {
        self.tables().sessions.retain(|s| s.token_hash != token_hash);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut tables = self.tables();
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.expires_at > now);
        Ok((before - tables.sessions.len()) as u64)
    }
}

/// A fresh temporary media root
pub fn temp_media_root() -> PathBuf {
    std::env::temp_dir().join(format!("rango-test-media-{}", Uuid::new_v4()))
}

pub fn templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

pub fn test_cookie() -> SessionCookie {
    SessionCookie {
        name: "sessionid".to_string(),
        max_age: Duration::from_secs(3600),
        secure: false,
    }
}

/// Services wired to one in-memory store and a throwaway media root
pub fn test_state(store: Arc<MemoryStore>, media_root: &Path) -> AppState {
    let hasher = PasswordHasher::new(1_000);
    let storage = Arc::new(MediaStorage::new(&MediaConfig {
        root: media_root.to_path_buf(),
        url_prefix: TEST_MEDIA_URL.to_string(),
        max_upload_size: TEST_MAX_UPLOAD_SIZE,
    }));

    AppState {
        templates: Arc::new(Templates::load(&templates_dir()).unwrap()),
        categories: Arc::new(CategoryService::new(store.clone())),
        pages: Arc::new(PageService::new(store.clone())),
        users: Arc::new(UserService::new(
            store.clone(),
            storage,
            hasher,
            TEST_MAX_UPLOAD_SIZE,
        )),
        auth: Arc::new(AuthService::new(
            store.clone(),
            store,
            hasher,
            test_cookie(),
        )),
    }
}

/// The full page router running against an in-memory store
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub media_root: PathBuf,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let media_root = temp_media_root();
        let router = build_router(
            test_state(store.clone(), &media_root),
            TEST_MEDIA_URL,
            &media_root,
            TEST_MAX_UPLOAD_SIZE * 4,
        );

        Self {
            server: TestServer::new(router).unwrap(),
            store,
            media_root,
        }
    }

    /// Create an active account directly in the store
    pub async fn create_user(&self, username: &str, password: &str) -> User {
        let hasher = PasswordHasher::new(1_000);
        let user = User::new(
            username.to_string(),
            String::new(),
            hasher.hash(password).await.unwrap(),
        );
        let profile = UserProfile::new(user.id, None, None);
        self.store
            .create_with_profile(&user, &profile)
            .await
            .unwrap();
        user
    }

    /// Log in and return the session cookie
    pub async fn login(&self, username: &str, password: &str) -> HeaderValue {
        let response = self
            .server
            .post("/login")
            .form(&[("username", username), ("password", password)])
            .await;
        let cookie = response.cookie("sessionid");
        HeaderValue::from_str(&format!("sessionid={}", cookie.value())).unwrap()
    }

    /// A logged-in user's session cookie, creating the account first
    pub async fn logged_in(&self, username: &str) -> HeaderValue {
        self.create_user(username, "password123").await;
        self.login(username, "password123").await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.media_root);
    }
}
