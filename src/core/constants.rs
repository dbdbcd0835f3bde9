pub const APP_TITLE: &str = "MSG CACHE";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/auth/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_GENERIC_FALLBACK: &str = "Something went wrong. Please try again.";

// Session credentials dropped from the store on logout.
pub const SESSION_KEYS: &[&str] = &["access", "refresh", "user"];

// Returned by the exit command; the handler turns it into `should_exit`.
pub const SIG_EXIT: &str = "__EXIT__";
