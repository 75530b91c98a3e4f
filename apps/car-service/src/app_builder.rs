//! # Car Service アプリケーション構築
//!
//! State の注入とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handler::{
    CarState,
    ReadinessState,
    create_car,
    delete_car,
    get_car,
    health_check,
    list_cars,
    readiness_check,
};

/// 車両 API のルーター
///
/// | Method | Path |
/// |--------|------|
/// | GET | `/cars` |
/// | PUT | `/cars` |
/// | GET | `/cars/{id}` |
/// | DELETE | `/cars/{id}` |
pub fn car_router(state: Arc<CarState>) -> Router {
    Router::new()
        .route("/cars", get(list_cars).put(create_car))
        .route("/cars/{id}", get(get_car).delete(delete_car))
        .with_state(state)
}

/// ヘルスチェックのルーター
pub fn health_router(state: Arc<ReadinessState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(state)
}

/// アプリケーション全体のルーターを構築する
///
/// すべてのリクエストに `TraceLayer` のスパンを付与する。
pub fn build_app(car_state: Arc<CarState>, readiness_state: Arc<ReadinessState>) -> Router {
    Router::new()
        .merge(car_router(car_state))
        .merge(health_router(readiness_state))
        .layer(TraceLayer::new_for_http())
}
