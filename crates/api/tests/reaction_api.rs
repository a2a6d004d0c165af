//! HTTP-level integration tests for likes, dislikes and the reaction check.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_as, post_as, upsert_track};
use sqlx::PgPool;

const ID: &str = "0123456789abcdef0123456789abcdef";

fn like_uri() -> String {
    format!("/api/v1/tracks/{ID}/like")
}

fn dislike_uri() -> String {
    format!("/api/v1/tracks/{ID}/dislike")
}

fn check_uri() -> String {
    format!("/api/v1/tracks/{ID}/reaction")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn like_then_check(pool: PgPool) {
    let app = common::build_test_app(pool);
    upsert_track(app.clone(), ID, "T1", "").await;

    let json = body_json(get_as(app.clone(), &check_uri(), "u1").await).await;
    assert_eq!(json["has_reacted"], false);
    assert!(json["reaction"].is_null());

    let response = post_as(app.clone(), &like_uri(), "u1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get_as(app.clone(), &check_uri(), "u1").await).await;
    assert_eq!(json["has_reacted"], true);
    assert_eq!(json["reaction"], "like");

    let track = body_json(get(app, &format!("/api/v1/tracks/{ID}")).await).await;
    assert_eq!(track["likes"], 1);
    assert_eq!(track["dislikes"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_reaction_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    upsert_track(app.clone(), ID, "T1", "").await;

    assert_eq!(
        post_as(app.clone(), &dislike_uri(), "u1").await.status(),
        StatusCode::NO_CONTENT
    );

    let response = post_as(app.clone(), &like_uri(), "u1").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let track = body_json(get(app, &format!("/api/v1/tracks/{ID}")).await).await;
    assert_eq!(track["likes"], 0);
    assert_eq!(track["dislikes"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_duplicate_likes_succeed_once(pool: PgPool) {
    let app = common::build_test_app(pool);
    upsert_track(app.clone(), ID, "T1", "").await;

    let uri = like_uri();
    let (a, b) = tokio::join!(
        post_as(app.clone(), &uri, "u1"),
        post_as(app.clone(), &uri, "u1")
    );
    let mut statuses = [a.status(), b.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::NO_CONTENT, StatusCode::CONFLICT]);

    let track = body_json(get(app, &format!("/api/v1/tracks/{ID}")).await).await;
    assert_eq!(track["likes"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reaction_on_unknown_track_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_as(app, &like_uri(), "u1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_user_header_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    upsert_track(app.clone(), ID, "T1", "").await;

    let response = get(app.clone(), &check_uri()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = post_as(app, &like_uri(), "   ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
