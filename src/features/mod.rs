//! Features layer - one module per area of the site
//!
//! Each feature owns its models, form DTOs, repositories, services,
//! handlers and routes.

pub mod auth;
pub mod categories;
pub mod home;
pub mod pages;
pub mod users;
