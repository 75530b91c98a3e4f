//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//!
//! ## ハンドラ一覧
//!
//! - `car`: 車両の作成・参照・削除・一覧
//! - `health`: ヘルスチェック

pub mod car;
pub mod health;

pub use car::{CarState, TextResponse, create_car, delete_car, get_car, list_cars};
pub use health::{ReadinessState, health_check, readiness_check};
