//! Server-rendered pages.
//!
//! Minimal HTML shells; the marketing content lives in the web frontend.

use axum::{Extension, response::Html};
use rust_i18n::t;

use crate::models::{Locale, RequestRoutingDecision};
use crate::services::LocaleRouter;

/// Pages served in the default locale only.
pub const SINGLE_LOCALE_PAGES: &[&str] = &["/pricing"];

pub async fn home(decision: Option<Extension<RequestRoutingDecision>>) -> Html<String> {
    let decision =
        decision.map(|Extension(d)| d).unwrap_or_else(RequestRoutingDecision::single_locale);
    let locale = decision.resolved_locale;
    let code = locale.code();

    let prompt = if decision.offers_switch() {
        language_prompt(&decision)
    } else {
        String::new()
    };
    let title = t!("home.title", locale = code);
    let body = format!(
        "{}<main><h1>{}</h1><p>{}</p></main>",
        prompt,
        title,
        t!("home.tagline", locale = code)
    );

    Html(render_page(locale, &title, &body))
}

pub async fn pricing() -> Html<String> {
    let locale = Locale::DEFAULT;
    let title = t!("pricing.title", locale = locale.code());
    Html(render_page(locale, &title, &format!("<main><h1>{}</h1></main>", title)))
}

/// Banner offering the page in the suggested locale, written in that language.
///
/// The link targets the URL the same request's router serves that locale at.
fn language_prompt(decision: &RequestRoutingDecision) -> String {
    let suggested = decision.suggested_locale;
    let code = suggested.code();
    let href =
        LocaleRouter::new(Locale::ALL, decision.unprefixed_locale).localized_path(suggested, "/");
    let text = t!("home.switch_prompt", locale = code, language = suggested.config().native_name);

    format!(
        r#"<aside class="language-prompt" lang="{code}"><p>{text}</p><a href="{href}" hreflang="{code}">{action}</a></aside>"#,
        code = code,
        text = text,
        href = href,
        action = t!("home.switch_action", locale = code),
    )
}

fn render_page(locale: Locale, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="{lang}" dir="{dir}"><head><meta charset="utf-8"><title>{title}</title></head><body>{body}</body></html>"#,
        lang = locale.code(),
        dir = locale.config().direction.as_str(),
        title = title,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CacheSource;

    fn decision(resolved: Locale, suggested: Locale, unprefixed: Locale) -> RequestRoutingDecision {
        RequestRoutingDecision {
            participates_in_locale_routing: true,
            resolved_locale: resolved,
            suggested_locale: suggested,
            unprefixed_locale: unprefixed,
            cache_source: CacheSource::Cookie,
        }
    }

    #[test]
    fn test_prompt_links_to_bare_path_when_suggestion_is_unprefixed() {
        let html = language_prompt(&decision(Locale::Ar, Locale::Bn, Locale::Bn));
        assert!(html.contains(r#"href="/" hreflang="bn""#));
    }

    #[test]
    fn test_prompt_links_to_prefixed_path_under_default_router() {
        let html = language_prompt(&decision(Locale::En, Locale::Ar, Locale::En));
        assert!(html.contains(r#"href="/ar" hreflang="ar""#));
    }
}
