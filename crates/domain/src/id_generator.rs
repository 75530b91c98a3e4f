//! # 車両 ID 採番
//!
//! ハンドラでの `CarId::new()` 直接呼び出しを置き換え、
//! テストで固定 ID を注入可能にするための抽象化。

use crate::car::CarId;

/// 新しい車両 ID を提供するトレイト
pub trait CarIdGenerator: Send + Sync {
    fn generate(&self) -> CarId;
}

/// UUID v4 で採番する実装
pub struct UuidCarIdGenerator;

impl CarIdGenerator for UuidCarIdGenerator {
    fn generate(&self) -> CarId {
        CarId::new()
    }
}

/// 常に同じ ID を返すテスト用実装
///
/// 重複キー経路を HTTP 経由で再現するために使う。
#[cfg(any(test, feature = "test-support"))]
pub struct FixedCarIdGenerator {
    id: CarId,
}

#[cfg(any(test, feature = "test-support"))]
impl FixedCarIdGenerator {
    pub fn new(id: CarId) -> Self {
        Self { id }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl CarIdGenerator for FixedCarIdGenerator {
    fn generate(&self) -> CarId {
        self.id.clone()
    }
}
