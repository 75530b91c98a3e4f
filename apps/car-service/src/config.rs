//! # Car Service 設定
//!
//! 環境変数から Car Service サーバーの設定を読み込む。
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `CAR_SERVICE_HOST` | No | `127.0.0.1` | バインドアドレス |
//! | `CAR_SERVICE_PORT` | No | `8080` | ポート番号 |
//! | `DYNAMODB_ENDPOINT` | **Yes** | - | DynamoDB エンドポイント URL |
//! | `CAR_TABLE_NAME` | No | `car` | 車両テーブル名 |
//! | `DYNAMODB_MAX_SESSIONS` | No | `16` | 同時セッション数の上限 |

use std::{env, str::FromStr};

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// DynamoDB 接続設定
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// エンドポイント URL（例: `http://localhost:18000`）
    pub endpoint:     String,
    /// 車両テーブル名
    pub table_name:   String,
    /// 同時に発行するセッション数の上限
    pub max_sessions: usize,
}

/// Car Service サーバーの設定
#[derive(Debug, Clone)]
pub struct CarServiceConfig {
    /// バインドアドレス
    pub host:     String,
    /// ポート番号
    pub port:     u16,
    pub dynamodb: DynamoDbConfig,
}

impl CarServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// テストでプロセスの環境変数を書き換えずに済むよう、参照元を差し替え可能にしている。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host:     lookup("CAR_SERVICE_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port:     parse_or(&lookup, "CAR_SERVICE_PORT", 8080)?,
            dynamodb: DynamoDbConfig {
                endpoint:     lookup("DYNAMODB_ENDPOINT")
                    .ok_or(ConfigError::Missing("DYNAMODB_ENDPOINT"))?,
                table_name:   lookup("CAR_TABLE_NAME").unwrap_or_else(|| "car".to_string()),
                max_sessions: parse_or(&lookup, "DYNAMODB_MAX_SESSIONS", 16)?,
            },
        })
    }
}

/// 値があればパースし、なければデフォルト値を使う
fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
