pub mod font_cache;
pub mod font_download;
pub mod font_source;
pub mod indexnow;
pub mod locale_router;

pub use font_cache::{FontLoadCache, FontSource};
pub use font_download::FontDownloadService;
pub use font_source::CdnFontSource;
pub use indexnow::{IndexNowService, MAX_BATCH};
pub use locale_router::{LocaleRouter, RouteAction};
