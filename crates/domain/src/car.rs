//! # 車両（Car）
//!
//! サービスが管理する唯一のエンティティ。メーカー・モデル・年式と、
//! 作成時にシステムが採番する識別子を持つ。
//!
//! ## 不変条件
//!
//! - `id` は全レコードで一意（ストア側の条件付き書き込みで保証）
//! - `id` は作成後に変更されない
//! - `year` に上下限は設けない
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use oldcars_domain::car::{Car, CarId};
//!
//! let id = CarId::parse("0b6f3c1e-9d4a-4a53-9c37-0c5c4f1f8a10")?;
//! let car = Car::new(id, "Ford", "T", 1920);
//!
//! assert_eq!(car.make(), "Ford");
//! assert_eq!(car.year(), 1920);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use crate::DomainError;

/// クラシックカーとみなす最小年式
///
/// [`Car::is_classic`] と、インフラ層の年式フィルタ検索で共有する。
pub const MIN_CLASSIC_YEAR: i64 = 1900;

// =========================================================================
// CarId（車両 ID）
// =========================================================================

/// 車両の一意識別子
///
/// 文字列トークンとして保存・ルーティングされる。
/// 新規作成時は UUID v4 の文字列表現を使用するが、パスパラメータから
/// 受け取る値は任意の非空文字列を許容する（存在しなければ未検出になるだけ）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct CarId(String);

impl CarId {
    /// 新しい ID を生成する（UUID v4）
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// 既存の文字列から ID を復元する
    ///
    /// 値は書き換えずにそのまま保持する。空文字列と空白のみの文字列は拒否する。
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation("車両 ID は必須です".to_string()));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CarId {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Car（車両エンティティ）
// =========================================================================

/// 車両エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    id:    CarId,
    make:  String,
    model: String,
    year:  i64,
}

impl Car {
    /// 車両を作成する
    pub fn new(id: CarId, make: impl Into<String>, model: impl Into<String>, year: i64) -> Self {
        Self {
            id,
            make: make.into(),
            model: model.into(),
            year,
        }
    }

    pub fn id(&self) -> &CarId {
        &self.id
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    /// 年式が [`MIN_CLASSIC_YEAR`] 以上か
    pub fn is_classic(&self) -> bool {
        self.year >= MIN_CLASSIC_YEAR
    }
}

/// テキストレスポンスの 1 行表現
impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{id: {}, make: {:?}, model: {:?}, year: {}}}",
            self.id, self.make, self.model, self.year
        )
    }
}
