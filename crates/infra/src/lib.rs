//! # OldCars インフラ層
//!
//! ドキュメントストア（DynamoDB）との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートは車両レコードのリポジトリトレイトと、その DynamoDB 実装を提供する。
//! ストアの詳細（アイテム形式、条件式、エラーコード）をカプセル化し、
//! 上位層には [`InfraErrorKind`](error::InfraErrorKind) による分類だけを見せる。
//!
//! ## 依存関係
//!
//! ```text
//! car-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`dynamodb`] - DynamoDB クライアント作成とテーブル自動作成
//! - [`pool`] - 操作単位のセッション取得
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use oldcars_infra::{dynamodb, pool::DynamoDbPool, repository::DynamoDbCarRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = dynamodb::create_client("http://localhost:18000").await;
//!     dynamodb::ensure_car_table(&client, "car").await?;
//!
//!     let pool = DynamoDbPool::new(client, 16);
//!     let repository = DynamoDbCarRepository::new(pool, "car");
//!     Ok(())
//! }
//! ```

pub mod dynamodb;
pub mod error;
pub mod pool;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
