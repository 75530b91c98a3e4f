//! # OldCars 共有ユーティリティ
//!
//! ビジネスロジックを含まない横断的なユーティリティを提供する。
//!
//! - [`observability`] - トレーシング初期化（`observability` feature）
//! - [`health`] - ヘルスチェック / readiness のレスポンス型

pub mod health;
pub mod observability;

pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
