//! # 車両ハンドラ
//!
//! 旧車レコードの作成・参照・削除・一覧を提供する。
//!
//! ## エンドポイント
//!
//! - `PUT /cars` - 車両を作成（ID はサーバー側で採番）
//! - `GET /cars` - 全車両の一覧
//! - `GET /cars/{id}` - 車両を 1 件参照
//! - `DELETE /cars/{id}` - 車両を削除
//!
//! レスポンスはすべてプレーンテキスト。未検出や重複はステータスではなく
//! 本文で伝え、ステータスは常に 200（ボディのデコード失敗のみ 500）。


use std::{fmt::Display, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use oldcars_domain::{
    car::{Car, CarId},
    id_generator::CarIdGenerator,
};
use oldcars_infra::repository::CarRepository;
use serde::Deserialize;

use crate::error::ApiError;

/// 車両 API の共有状態
pub struct CarState {
    pub repository:   Arc<dyn CarRepository>,
    pub id_generator: Arc<dyn CarIdGenerator>,
}

/// 車両作成リクエスト
///
/// `id` フィールドが含まれていても無視し、サーバー側で採番する。
#[derive(Debug, Deserialize)]
pub struct CreateCarRequest {
    pub make:  String,
    pub model: String,
    pub year:  i64,
}

/// 行単位で組み立てるプレーンテキストレスポンス
///
/// 書き込んだ順に行が並ぶ。
#[derive(Debug, Default)]
pub struct TextResponse {
    body: String,
}

impl TextResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1 行追加する
    pub fn line(&mut self, text: impl Display) -> &mut Self {
        self.body.push_str(&text.to_string());
        self.body.push('\n');
        self
    }

    #[cfg(test)]
    fn as_str(&self) -> &str {
        &self.body
    }
}

impl IntoResponse for TextResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.body,
        )
            .into_response()
    }
}

/// PUT /cars
///
/// ボディを JSON としてデコードし、採番した ID で車両を作成する。
#[tracing::instrument(skip_all)]
pub async fn create_car(
    State(state): State<Arc<CarState>>,
    body: Bytes,
) -> Result<TextResponse, ApiError> {
    let req: CreateCarRequest = serde_json::from_slice(&body)?;
    let car = Car::new(
        state.id_generator.generate(),
        req.make,
        req.model,
        req.year,
    );

    let mut response = TextResponse::new();
    match state.repository.insert(&car).await {
        Ok(()) => {
            tracing::info!(car_id = %car.id(), "車両を作成しました");
            response.line(format_args!("Car created successfully: {car}"));
        }
        Err(e) if e.is_duplicate_key() => {
            tracing::info!(car_id = %car.id(), "車両 ID が重複しています");
            response.line(format_args!("Car already exists: {car}"));
        }
        Err(e) => {
            tracing::error!(
                car_id = %car.id(),
                error = %e,
                span_trace = %e.span_trace(),
                "車両の作成に失敗しました"
            );
            response.line(format_args!("Failed to create car: {car}"));
        }
    }
    Ok(response)
}

/// GET /cars/{id}
#[tracing::instrument(skip_all, fields(car_id = %id))]
pub async fn get_car(
    State(state): State<Arc<CarState>>,
    Path(id): Path<String>,
) -> TextResponse {
    let mut response = TextResponse::new();
    response.line(format_args!("Looking up car with ID: {id}"));

    match find_car(state.repository.as_ref(), &id).await {
        Some(car) => response.line(format_args!("Car: {car}")),
        None => response.line("Car not found!"),
    };
    response
}

/// DELETE /cars/{id}
///
/// 存在確認の後に削除する。存在しなければストアは変更しない。
#[tracing::instrument(skip_all, fields(car_id = %id))]
pub async fn delete_car(
    State(state): State<Arc<CarState>>,
    Path(id): Path<String>,
) -> TextResponse {
    let mut response = TextResponse::new();
    response.line(format_args!("Removing car with ID: {id}"));

    let Some(car) = find_car(state.repository.as_ref(), &id).await else {
        response.line("Car not found!");
        return response;
    };

    match state.repository.delete(car.id()).await {
        Ok(()) => {
            tracing::info!("車両を削除しました");
            response.line("Car removed!");
        }
        // 参照と削除の間に別リクエストが削除した
        Err(e) if e.is_not_found() => {
            response.line("Car not found!");
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                span_trace = %e.span_trace(),
                "車両の削除に失敗しました"
            );
        }
    }
    response
}

/// GET /cars
///
/// 取得に失敗した場合もエラーステータスにはせず、空の一覧を返す。
#[tracing::instrument(skip_all)]
pub async fn list_cars(State(state): State<Arc<CarState>>) -> TextResponse {
    let cars = state.repository.find_all().await.unwrap_or_else(|e| {
        tracing::error!(
            error = %e,
            span_trace = %e.span_trace(),
            "車両一覧の取得に失敗しました"
        );
        Vec::new()
    });

    let mut response = TextResponse::new();
    response.line("Old car listing:");
    for car in &cars {
        response.line(format_args!("- {car}"));
    }
    response
}

/// パス上の ID で車両を探す
///
/// 見つからない場合と、ID として解釈できない場合は `None`。
/// それ以外の失敗はログに残したうえで `None` として扱う。
async fn find_car(repository: &dyn CarRepository, raw_id: &str) -> Option<Car> {
    let id = CarId::parse(raw_id).ok()?;
    match repository.find_by_id(&id).await {
        Ok(car) => Some(car),
        Err(e) => {
            if !e.is_not_found() {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "車両の取得に失敗しました"
                );
            }
            None
        }
    }
}
