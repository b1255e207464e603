//! HTTP-level validation tests.
//!
//! These exercise the request-validation paths that fail before any query is
//! issued, so the pool is created lazily and never actually connects.

use actix_web::{http::StatusCode, test, web, App};
use chrono::{Duration, Utc};
use discussion_service::config::FeedConfig;
use discussion_service::handlers;
use discussion_service::middleware::{Claims, JwtAuthMiddleware};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

const TEST_SECRET: &str = "test-secret";

fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgresql://localhost/discussion_test")
        .expect("lazy pool")
}

fn bearer_token() -> String {
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token");
    format!("Bearer {}", token)
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .app_data(web::Data::new(FeedConfig {
                    default_page_size: 20,
                    max_page_size: 100,
                }))
                .service(
                    web::scope("/api/v1")
                        .wrap(JwtAuthMiddleware::new(TEST_SECRET))
                        .service(
                            web::scope("/feed").route("", web::get().to(handlers::get_feed)),
                        )
                        .service(
                            web::scope("/votes").service(
                                web::resource("").route(web::post().to(handlers::toggle_vote)),
                            ),
                        ),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn feed_rejects_malformed_cursor_with_400() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/feed?cursor=%21%21not-base64%21%21")
        .insert_header(("Authorization", bearer_token()))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn feed_rejects_non_uuid_community_filter_with_400() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/feed?communities=not-a-uuid")
        .insert_header(("Authorization", bearer_token()))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn missing_bearer_token_is_401() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/v1/feed").to_request();
    // Middleware errors surface as service-level `Err` under `init_service`;
    // convert them to the HTTP response a real server would send.
    let resp = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.map_into_boxed_body().into_parts().1,
        Err(err) => actix_web::HttpResponse::from_error(err),
    };
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn token_signed_with_wrong_secret_is_401() {
    let app = test_app!();

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .expect("token");

    let req = test::TestRequest::get()
        .uri("/api/v1/feed")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let resp = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.map_into_boxed_body().into_parts().1,
        Err(err) => actix_web::HttpResponse::from_error(err),
    };
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn unknown_vote_direction_is_400() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/votes")
        .insert_header(("Authorization", bearer_token()))
        .set_json(serde_json::json!({
            "target_id": Uuid::new_v4(),
            "target_kind": "POST",
            "direction": "SIDEWAYS"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
