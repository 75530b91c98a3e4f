//! # OldCars ドメイン層
//!
//! 車両レコード（Car）を中心としたドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つ [`car::Car`]
//! - **値オブジェクト**: 識別子 [`car::CarId`]
//! - **識別子の採番**: [`id_generator::CarIdGenerator`] でテスト時に固定 ID を注入可能
//! - **ドメインエラー**: ビジネスルール違反を表現する [`DomainError`]
//!
//! ## 依存関係の方向
//!
//! ```text
//! car-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DynamoDB、HTTP）には一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use oldcars_domain::car::{Car, CarId};
//!
//! let car = Car::new(CarId::new(), "Ford", "T", 1920);
//! assert!(car.is_classic());
//! ```

pub mod car;
pub mod error;
pub mod id_generator;

pub use error::DomainError;
