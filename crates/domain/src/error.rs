//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! 永続化層の失敗（重複キー、未検出、通信エラー）はインフラ層の
//! `InfraErrorKind` が表現する。ここではドメインの値そのものが
//! 不正な場合のみを扱う。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がドメインの不変条件に違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - 空文字列の車両 ID
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
