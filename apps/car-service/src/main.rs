//! # Car Service サーバー
//!
//! 旧車レコードを DynamoDB に保存し、プレーンテキストで応答する HTTP サービス。
//!
//! ## 役割
//!
//! - **車両 API**: `/cars` 配下で作成・参照・削除・一覧を提供
//! - **データ永続化**: DynamoDB の車両テーブルへ保存（起動時に自動作成）
//! - **ヘルスチェック**: `/health`（liveness）と `/health/ready`（readiness）
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │    Client    │────▶│ Car Service  │────▶│   DynamoDB   │
//! │              │     │  port: 8080  │     │ (car table)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CAR_SERVICE_HOST` | No | バインドアドレス（デフォルト: `127.0.0.1`） |
//! | `CAR_SERVICE_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `DYNAMODB_ENDPOINT` | **Yes** | DynamoDB エンドポイント URL |
//! | `CAR_TABLE_NAME` | No | 車両テーブル名（デフォルト: `car`） |
//! | `DYNAMODB_MAX_SESSIONS` | No | 同時セッション数の上限（デフォルト: `16`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,oldcars=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（DynamoDB Local を使用）
//! DYNAMODB_ENDPOINT=http://localhost:18000 cargo run -p oldcars-car-service
//!
//! # 本番環境
//! LOG_FORMAT=json DYNAMODB_ENDPOINT=https://... cargo run -p oldcars-car-service --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use oldcars_car_service::{
    app_builder::build_app,
    config::CarServiceConfig,
    handler::{CarState, ReadinessState},
};
use oldcars_domain::id_generator::UuidCarIdGenerator;
use oldcars_infra::{dynamodb, pool::DynamoDbPool, repository::DynamoDbCarRepository};
use oldcars_shared::observability::{self, TracingConfig};
use tokio::net::TcpListener;

/// Car Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("car-service");
    observability::init_tracing(&tracing_config);
    let _tracing_guard = tracing_config.app_span().entered();

    // 設定読み込み
    let config = CarServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Car Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // DynamoDB クライアントを作成し、テーブルを用意する
    let client = dynamodb::create_client(&config.dynamodb.endpoint).await;
    dynamodb::ensure_car_table(&client, &config.dynamodb.table_name)
        .await
        .context("車両テーブルのセットアップに失敗しました")?;
    tracing::info!(
        table = %config.dynamodb.table_name,
        "DynamoDB に接続しました"
    );

    // 依存コンポーネントを初期化
    let pool = DynamoDbPool::new(client, config.dynamodb.max_sessions);
    let repository = DynamoDbCarRepository::new(pool.clone(), &config.dynamodb.table_name);
    let car_state = Arc::new(CarState {
        repository:   Arc::new(repository),
        id_generator: Arc::new(UuidCarIdGenerator),
    });
    let readiness_state = Arc::new(ReadinessState { pool });

    let app = build_app(car_state, readiness_state);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Car Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
