/// Number of categories shown on the index page
pub const TOP_CATEGORIES_LIMIT: i64 = 5;

/// Number of pages shown on the index page
pub const TOP_PAGES_LIMIT: i64 = 5;

// =============================================================================
// URLS
// =============================================================================

pub const INDEX_URL: &str = "/";

/// Where anonymous requests to login-only pages are sent
pub const LOGIN_URL: &str = "/login";

// =============================================================================
// UPLOADS
// =============================================================================

/// Media sub-directory profile pictures are stored under
pub const PROFILE_IMAGES_DIR: &str = "profile_images";

/// Image types accepted for profile pictures
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

// =============================================================================
// MESSAGES
// =============================================================================

pub const MSG_ACCOUNT_DISABLED: &str = "Your Rango account is disabled.";
pub const MSG_INVALID_LOGIN: &str = "Invalid login details supplied.";
pub const MSG_RESTRICTED: &str = "Since you're logged in, you can see this text!";
