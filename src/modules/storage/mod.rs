//! Storage module for file management
//!
//! Provides local media storage for profile picture uploads.

mod media_storage;

pub use media_storage::{extension_for_content_type, MediaStorage};
