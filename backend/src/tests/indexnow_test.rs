use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::tests::common::{
    SITE_URL, body_json, body_string, create_test_app, get, header, post_json, test_config,
    with_engines,
};

fn engines(server: &MockServer) -> Vec<(&'static str, String)> {
    vec![
        ("indexnow", format!("{}/indexnow", server.uri())),
        ("bing", format!("{}/bing", server.uri())),
    ]
}

#[tokio::test]
async fn test_submit_goes_to_first_engine_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .and(body_partial_json(json!({
            "host": "arabiccalligraphygenerator.com",
            "key": "test-key-123",
            "keyLocation": format!("{}/indexnow/test-key-123.txt", SITE_URL),
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bing"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = create_test_app(with_engines(test_config(), &engines(&server)));
    let response = post_json(
        &app,
        "/api/indexnow",
        json!({ "urls": [format!("{}/", SITE_URL), format!("{}/ar", SITE_URL)] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let summary = body_json(response).await;
    assert_eq!(summary["submitted"].as_array().unwrap().len(), 2);
    assert_eq!(summary["results"].as_array().unwrap().len(), 1);
    assert_eq!(summary["results"][0]["engine"], "indexnow");
    assert_eq!(summary["results"][0]["success"], true);
}

#[tokio::test]
async fn test_immediate_submit_reports_every_engine() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bing"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_test_app(with_engines(test_config(), &engines(&server)));
    let response = post_json(
        &app,
        "/api/indexnow",
        json!({ "urls": [format!("{}/pricing", SITE_URL)], "immediate": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let summary = body_json(response).await;
    let results = summary["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[0]["status"], 202);
    assert_eq!(results[1]["engine"], "bing");
    assert_eq!(results[1]["success"], false);
    assert_eq!(results[1]["status"], 500);
}

#[tokio::test]
async fn test_foreign_urls_are_rejected() {
    let app = create_test_app(test_config());

    let response = post_json(
        &app,
        "/api/indexnow",
        json!({ "urls": ["https://example.com/", "/relative"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], 4001);
}

#[tokio::test]
async fn test_empty_url_list_fails_validation() {
    let app = create_test_app(test_config());

    let response = post_json(&app, "/api/indexnow", json!({ "urls": [] })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], 4001);
}

#[tokio::test]
async fn test_submit_when_disabled() {
    let mut config = test_config();
    config.indexnow.enabled = false;
    let app = create_test_app(config);

    let response =
        post_json(&app, "/api/indexnow", json!({ "urls": [format!("{}/", SITE_URL)] })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], 5004);
}

#[tokio::test]
async fn test_key_file_served_only_for_configured_key() {
    let app = create_test_app(test_config());

    let response = get(&app, "/indexnow/test-key-123.txt", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "test-key-123");

    let response = get(&app, "/indexnow/other-key.txt", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_robots_allows_crawling_in_production() {
    let app = create_test_app(test_config());

    let response = get(&app, "/robots.txt", &[("host", "arabiccalligraphygenerator.com")]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Allow: /"));
    assert!(body.contains(&format!("Sitemap: {}/sitemap.xml", SITE_URL)));
}

#[tokio::test]
async fn test_robots_blocks_staging() {
    let app = create_test_app(test_config());

    let response = get(&app, "/robots.txt", &[("host", "staging.arabiccalligraphygenerator.com")]).await;
    assert_eq!(header(&response, "x-robots-tag").as_deref(), Some("noindex, nofollow"));
    assert!(body_string(response).await.contains("Disallow: /"));
}

#[tokio::test]
async fn test_sitemap_lists_localized_home() {
    let app = create_test_app(test_config());

    let response = get(&app, "/sitemap.xml", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(header(&response, "content-type").unwrap().contains("xml"));

    let body = body_string(response).await;
    assert!(body.contains(&format!("<loc>{}/ar</loc>", SITE_URL)));
    assert!(body.contains(r#"hreflang="x-default""#));
    assert!(body.contains(&format!("<loc>{}/pricing</loc>", SITE_URL)));
}
