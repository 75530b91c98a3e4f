//! # リポジトリ実装
//!
//! ドメインモデルの永続化を担当するリポジトリトレイトと、その具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **ストア抽象化**: DynamoDB 固有の処理（アイテム変換、条件式）をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod car_repository;

pub use car_repository::{CarRepository, DynamoDbCarRepository};
