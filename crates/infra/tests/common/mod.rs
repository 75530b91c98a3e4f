//! テスト共通フィクスチャ
//!
//! DynamoDB Local を使用する統合テストで共通利用するヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use aws_sdk_dynamodb::Client;
use oldcars_domain::car::{Car, CarId};
use oldcars_infra::{dynamodb, pool::DynamoDbPool, repository::DynamoDbCarRepository};

/// テスト用の DynamoDB エンドポイント
///
/// 優先順位:
/// 1. `DYNAMODB_ENDPOINT`（CI で明示的に設定）
/// 2. `DYNAMODB_PORT` から構築
/// 3. フォールバック: `http://localhost:18000`
pub fn dynamodb_endpoint() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| {
        let port = std::env::var("DYNAMODB_PORT").unwrap_or_else(|_| "18000".to_string());
        format!("http://localhost:{port}")
    })
}

/// テストごとに分離されたテーブル
///
/// ランダムなテーブル名で他テストとの競合を防止する。
pub struct TestTable {
    pub client:     Client,
    pub table_name: String,
}

impl TestTable {
    pub async fn create() -> Self {
        let client = dynamodb::create_client(&dynamodb_endpoint()).await;
        let table_name = format!("test_car_{}", uuid::Uuid::now_v7());

        dynamodb::ensure_car_table(&client, &table_name)
            .await
            .expect("テスト用テーブルの作成に失敗");

        Self { client, table_name }
    }

    pub fn repository(&self, max_sessions: usize) -> DynamoDbCarRepository {
        DynamoDbCarRepository::new(
            DynamoDbPool::new(self.client.clone(), max_sessions),
            self.table_name.clone(),
        )
    }

    pub async fn cleanup(self) {
        let _ = self
            .client
            .delete_table()
            .table_name(&self.table_name)
            .send()
            .await;
    }
}

/// ID を指定して車両を作成する
pub fn car_with_id(id: &str, make: &str, model: &str, year: i64) -> Car {
    Car::new(CarId::parse(id).unwrap(), make, model, year)
}

/// ランダムな ID で Ford Model T を作成する
pub fn model_t() -> Car {
    Car::new(CarId::new(), "Ford", "T", 1920)
}
