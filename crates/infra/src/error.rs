//! # インフラ層エラー定義
//!
//! ドキュメントストア（DynamoDB）との通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **種別による分岐**: 呼び出し側は特定のエラー値との同一性ではなく
//!   [`InfraErrorKind`] のバリアントで分岐する
//! - **ストア固有エラーの正規化**: DynamoDB の `ConditionalCheckFailedException`
//!   は操作に応じて `DuplicateKey` / `NotFound` に変換する
//! - **SpanTrace 自動捕捉**: convenience constructor でエラー生成時の
//!   呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
///
/// ## パターンマッチ
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::DuplicateKey { .. } => { /* 重複 */ }
///     InfraErrorKind::NotFound { .. } => { /* 未検出 */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 一意制約違反
    ///
    /// 同じ識別子のドキュメントが既に存在するため挿入できなかった。
    #[error("重複したキーです: {entity}(id={id})")]
    DuplicateKey {
        /// エンティティ名（例: "Car"）
        entity: String,
        /// 衝突した ID
        id:     String,
    },

    /// 識別子に一致するドキュメントが存在しない
    #[error("見つかりません: {entity}(id={id})")]
    NotFound {
        /// エンティティ名（例: "Car"）
        entity: String,
        /// 検索に使用した ID
        id:     String,
    },

    /// ストアとの通信エラー
    ///
    /// AWS SDK のエラー型はジェネリクスが深く `#[from]` が困難なため、
    /// 手動で String にマップする。
    #[error("ストア通信エラー: {0}")]
    Transport(String),

    /// 保存済みドキュメントのデコードエラー
    ///
    /// 属性の欠落や型不一致など、ドキュメントをドメインモデルに
    /// 変換できなかった場合に使用する。
    #[error("デコードエラー: {0}")]
    Decode(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 一意制約違反か
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self.kind, InfraErrorKind::DuplicateKey { .. })
    }

    /// 未検出か
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, InfraErrorKind::NotFound { .. })
    }

    // ===== Convenience constructors =====

    fn capture(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    /// 一意制約違反エラーを生成する
    pub fn duplicate_key(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::DuplicateKey {
            entity: entity.into(),
            id:     id.into(),
        })
    }

    /// 未検出エラーを生成する
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::NotFound {
            entity: entity.into(),
            id:     id.into(),
        })
    }

    /// ストア通信エラーを生成する
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::Transport(msg.into()))
    }

    /// デコードエラーを生成する
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::Decode(msg.into()))
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}
