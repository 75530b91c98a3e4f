//! # Car Service エラー定義
//!
//! ハンドラが早期終了するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ドメイン上の結果（未検出・重複）はエラーレスポンスにせず、
//! 200 のテキスト本文で伝える。ここで扱うのはリクエストボディを
//! 解釈できなかった場合のみ。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Car Service で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエストボディの JSON デコード失敗（500、本文はデコードエラーそのもの）
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Decode(err) => {
                tracing::warn!(error = %err, "リクエストボディのデコードに失敗しました");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{err}\n")).into_response()
            }
        }
    }
}
