//! 車両 API のシナリオテスト
//!
//! `car_router` にインメモリリポジトリを注入し、HTTP 経由で一連の操作を確認する。
//!
//! 実行方法:
//! ```bash
//! cargo test -p oldcars-car-service --test car_api_test
//! ```

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use oldcars_car_service::{app_builder::car_router, handler::CarState};
use oldcars_domain::{
    car::CarId,
    id_generator::{CarIdGenerator, FixedCarIdGenerator, UuidCarIdGenerator},
};
use oldcars_infra::{mock::MockCarRepository, repository::CarRepository};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

fn app_with(repository: &MockCarRepository, id_generator: Arc<dyn CarIdGenerator>) -> Router {
    car_router(Arc::new(CarState {
        repository: Arc::new(repository.clone()),
        id_generator,
    }))
}

async fn call(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// 作成メッセージ中の `{id: ..., ...}` から ID を取り出す
fn extract_id(body: &str) -> &str {
    let start = body.find("{id: ").expect("id が含まれていない") + "{id: ".len();
    let end = start + body[start..].find(',').expect("id の終端がない");
    &body[start..end]
}

#[tokio::test]
async fn test_作成した車両をidで参照できる() {
    let repository = MockCarRepository::new();
    let app = app_with(&repository, Arc::new(UuidCarIdGenerator));

    let (status, body) = call(
        &app,
        Method::PUT,
        "/cars",
        r#"{"make":"Ford","model":"T","year":1920}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Car created successfully: "), "body: {body}");

    let id = extract_id(&body).to_string();
    let (status, body) = call(&app, Method::GET, &format!("/cars/{id}"), "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        format!(
            "Looking up car with ID: {id}\n\
             Car: {{id: {id}, make: \"Ford\", model: \"T\", year: 1920}}\n"
        )
    );
}

#[tokio::test]
async fn test_同じidで2回作成すると2回目は重複になる() {
    let repository = MockCarRepository::new();
    let fixed = CarId::parse("car-fixed").unwrap();
    let app = app_with(&repository, Arc::new(FixedCarIdGenerator::new(fixed.clone())));
    let payload = r#"{"make":"Ford","model":"T","year":1920}"#;

    let (_, first) = call(&app, Method::PUT, "/cars", payload).await;
    let (status, second) = call(&app, Method::PUT, "/cars", payload).await;

    assert!(first.starts_with("Car created successfully: "), "first: {first}");
    assert_eq!(status, StatusCode::OK);
    assert!(second.starts_with("Car already exists: "), "second: {second}");
    assert_eq!(repository.len(), 1);
    assert_eq!(repository.find_by_id(&fixed).await.unwrap().make(), "Ford");
}

#[tokio::test]
async fn test_存在しないidの削除は未検出となりストアを変更しない() {
    let repository = MockCarRepository::new();
    let app = app_with(&repository, Arc::new(UuidCarIdGenerator));
    call(
        &app,
        Method::PUT,
        "/cars",
        r#"{"make":"Chevrolet","model":"Bel Air","year":1957}"#,
    )
    .await;
    let before = repository.find_all().await.unwrap();

    let (status, body) = call(&app, Method::DELETE, "/cars/no-such-car", "").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Car not found!"), "body: {body}");
    assert_eq!(repository.find_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_空のストアの一覧はヘッダー行のみ() {
    let repository = MockCarRepository::new();
    let app = app_with(&repository, Arc::new(UuidCarIdGenerator));

    let (status, body) = call(&app, Method::GET, "/cars", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Old car listing:\n");
}

#[tokio::test]
async fn test_作成から削除までのライフサイクル() {
    let repository = MockCarRepository::new();
    let app = app_with(&repository, Arc::new(UuidCarIdGenerator));

    let (_, created) = call(
        &app,
        Method::PUT,
        "/cars",
        r#"{"make":"Ford","model":"T","year":1920}"#,
    )
    .await;
    let id = extract_id(&created).to_string();

    let (_, listing) = call(&app, Method::GET, "/cars", "").await;
    assert_eq!(listing.lines().count(), 2);
    assert!(listing.contains(&id), "listing: {listing}");

    let (_, removed) = call(&app, Method::DELETE, &format!("/cars/{id}"), "").await;
    assert_eq!(removed, format!("Removing car with ID: {id}\nCar removed!\n"));

    let (_, lookup) = call(&app, Method::GET, &format!("/cars/{id}"), "").await;
    assert!(lookup.ends_with("Car not found!\n"), "lookup: {lookup}");
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_不正なボディの作成は500でストアを変更しない() {
    let repository = MockCarRepository::new();
    let app = app_with(&repository, Arc::new(UuidCarIdGenerator));

    let (status, body) = call(&app, Method::PUT, "/cars", r#"{"make":"Ford","year":"old"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.is_empty());
    assert!(repository.is_empty());
}
