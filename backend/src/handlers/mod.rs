pub mod fonts;
pub mod indexnow;
pub mod locales;
pub mod pages;
pub mod seo;
