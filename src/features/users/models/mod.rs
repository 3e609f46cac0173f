mod user;
mod user_profile;

pub use user::User;
pub use user_profile::UserProfile;
