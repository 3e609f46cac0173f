pub mod dtos;
pub mod handlers;
pub mod model;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod session;
pub mod workers;

pub use services::AuthService;
pub use workers::SessionCleaner;
