mod session_cleaner;

pub use session_cleaner::SessionCleaner;
