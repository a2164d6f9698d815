pub mod font;
pub mod indexnow;
pub mod locale;
pub mod routing;

pub use font::{FontLoadResponse, FontStatus, LoadOutcome};
pub use indexnow::{EngineResult, IndexNowPayload, IndexNowRequest, IndexNowSummary};
pub use locale::{Locale, LocaleConfig, LocaleInfo, TextDirection, locale_for_country};
pub use routing::{CacheSource, RequestRoutingDecision};
