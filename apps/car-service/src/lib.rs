//! # Car Service ライブラリ
//!
//! 旧車レコードを扱う HTTP サービスのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: ハンドラのエラーレスポンス
//! - `handler`: HTTP ハンドラ

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
