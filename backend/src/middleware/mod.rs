pub mod locale;
pub mod routing;

pub use locale::locale_middleware;
pub use routing::{
    COUNTRY_HEADER, ROBOTS_TAG_HEADER, SUGGESTED_LOCALE_HEADER, locale_routing_middleware,
};
