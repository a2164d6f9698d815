pub mod classify;
pub mod cookie;
pub mod error;
pub mod i18n;

pub use classify::{HostClass, MULTILINGUAL_PATHS, PathClass, classify_host, classify_path};
pub use cookie::{LOCALE_COOKIE_NAME, locale_cookie, read_cookie};
pub use error::{ApiError, ApiResult};
pub use i18n::{extract_locale_from_header, get_locale, suggest_locale, with_locale};
