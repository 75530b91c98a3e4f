//! # CarRepository
//!
//! 車両レコードの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **DynamoDB**: 1 車両 = 1 アイテム。PK = `id`
//! - **操作単位のセッション**: 各メソッドは [`DynamoDbPool`] からセッションを取得し、
//!   メソッドの終了とともに返却する
//! - **重複検出**: 挿入は `attribute_not_exists(id)` 条件付き書き込みで行い、
//!   条件不成立を [`InfraErrorKind::DuplicateKey`](crate::error::InfraErrorKind) に変換する
//! - **更新・削除の未検出**: `attribute_exists(id)` 条件で、一致するアイテムがない
//!   場合を [`InfraErrorKind::NotFound`](crate::error::InfraErrorKind) として区別する
//! - **一覧**: Scan を `LastEvaluatedKey` が尽きるまで繰り返す。順序は保証しない

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use oldcars_domain::car::{Car, CarId, MIN_CLASSIC_YEAR};

use crate::{
    InfraError,
    dynamodb::CAR_KEY_ATTRIBUTE,
    pool::{DynamoDbPool, DynamoDbSession},
};

/// エラーメッセージに使うエンティティ名
pub const CAR_ENTITY: &str = "Car";

/// 車両リポジトリトレイト
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// 車両を新規登録する
    ///
    /// 同じ ID の車両が既に存在する場合は `DuplicateKey` を返す。
    async fn insert(&self, car: &Car) -> Result<(), InfraError>;

    /// ID が一致する車両を、渡された内容で丸ごと置き換える
    ///
    /// 一致する車両がない場合は `NotFound` を返す。
    async fn update(&self, car: &Car) -> Result<(), InfraError>;

    /// 車両を削除する
    ///
    /// 一致する車両がない場合は `NotFound` を返す。
    async fn delete(&self, id: &CarId) -> Result<(), InfraError>;

    /// ID で車両を取得する
    ///
    /// 一致する車両がない場合は `NotFound` を返す。
    async fn find_by_id(&self, id: &CarId) -> Result<Car, InfraError>;

    /// 全車両を取得する（順序不定。0 件なら空の Vec）
    async fn find_all(&self) -> Result<Vec<Car>, InfraError>;

    /// 年式が [`MIN_CLASSIC_YEAR`] 以上の車両を取得する
    async fn find_classics(&self) -> Result<Vec<Car>, InfraError>;
}

/// DynamoDB 実装の CarRepository
pub struct DynamoDbCarRepository {
    pool:       DynamoDbPool,
    table_name: String,
}

impl DynamoDbCarRepository {
    pub fn new(pool: DynamoDbPool, table_name: impl Into<String>) -> Self {
        Self {
            pool,
            table_name: table_name.into(),
        }
    }

    /// 条件付き PutItem を実行する
    ///
    /// 条件不成立（`ConditionalCheckFailedException`）の場合は `Ok(false)` を返す。
    async fn put_conditionally(
        &self,
        session: &DynamoDbSession,
        car: &Car,
        condition: &str,
    ) -> Result<bool, InfraError> {
        let result = session
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(convert_car_to_item(car)))
            .condition_expression(condition)
            .expression_attribute_names("#id", CAR_KEY_ATTRIBUTE)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) => {
                let condition_failed = err
                    .as_service_error()
                    .map(|e| e.is_conditional_check_failed_exception())
                    .unwrap_or(false);
                if condition_failed {
                    Ok(false)
                } else {
                    Err(InfraError::transport(format!("車両の書き込みに失敗: {err}")))
                }
            }
        }
    }

    /// Scan を全ページ分繰り返して車両を集める
    async fn scan_cars(&self, classic_only: bool) -> Result<Vec<Car>, InfraError> {
        let session = self.pool.acquire().await?;
        let mut cars = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let mut scan = session
                .scan()
                .table_name(&self.table_name)
                .consistent_read(true)
                .set_exclusive_start_key(start_key.take());

            if classic_only {
                // "year" は DynamoDB の予約語のため、ExpressionAttributeNames で回避
                scan = scan
                    .filter_expression("#year_attr >= :min_year")
                    .expression_attribute_names("#year_attr", "year")
                    .expression_attribute_values(
                        ":min_year",
                        AttributeValue::N(MIN_CLASSIC_YEAR.to_string()),
                    );
            }

            let output = scan
                .send()
                .await
                .map_err(|e| InfraError::transport(format!("車両一覧の取得に失敗: {e}")))?;

            for item in output.items() {
                cars.push(convert_item_to_car(item)?);
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        Ok(cars)
    }
}

#[async_trait]
impl CarRepository for DynamoDbCarRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(car_id = %car.id()))]
    async fn insert(&self, car: &Car) -> Result<(), InfraError> {
        let session = self.pool.acquire().await?;

        if self
            .put_conditionally(&session, car, "attribute_not_exists(#id)")
            .await?
        {
            Ok(())
        } else {
            Err(InfraError::duplicate_key(CAR_ENTITY, car.id().as_str()))
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(car_id = %car.id()))]
    async fn update(&self, car: &Car) -> Result<(), InfraError> {
        let session = self.pool.acquire().await?;

        if self
            .put_conditionally(&session, car, "attribute_exists(#id)")
            .await?
        {
            Ok(())
        } else {
            Err(InfraError::not_found(CAR_ENTITY, car.id().as_str()))
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(car_id = %id))]
    async fn delete(&self, id: &CarId) -> Result<(), InfraError> {
        let session = self.pool.acquire().await?;

        let result = session
            .delete_item()
            .table_name(&self.table_name)
            .key(CAR_KEY_ATTRIBUTE, AttributeValue::S(id.as_str().to_string()))
            .condition_expression("attribute_exists(#id)")
            .expression_attribute_names("#id", CAR_KEY_ATTRIBUTE)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                let condition_failed = err
                    .as_service_error()
                    .map(|e| e.is_conditional_check_failed_exception())
                    .unwrap_or(false);
                if condition_failed {
                    Err(InfraError::not_found(CAR_ENTITY, id.as_str()))
                } else {
                    Err(InfraError::transport(format!("車両の削除に失敗: {err}")))
                }
            }
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(car_id = %id))]
    async fn find_by_id(&self, id: &CarId) -> Result<Car, InfraError> {
        let session = self.pool.acquire().await?;

        let output = session
            .get_item()
            .table_name(&self.table_name)
            .key(CAR_KEY_ATTRIBUTE, AttributeValue::S(id.as_str().to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| InfraError::transport(format!("車両の取得に失敗: {e}")))?;

        match output.item() {
            Some(item) => convert_item_to_car(item),
            None => Err(InfraError::not_found(CAR_ENTITY, id.as_str())),
        }
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Car>, InfraError> {
        self.scan_cars(false).await
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_classics(&self) -> Result<Vec<Car>, InfraError> {
        self.scan_cars(true).await
    }
}

/// Car を DynamoDB アイテムに変換する
fn convert_car_to_item(car: &Car) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        CAR_KEY_ATTRIBUTE.to_string(),
        AttributeValue::S(car.id().as_str().to_string()),
    );
    item.insert("make".to_string(), AttributeValue::S(car.make().to_string()));
    item.insert(
        "model".to_string(),
        AttributeValue::S(car.model().to_string()),
    );
    item.insert("year".to_string(), AttributeValue::N(car.year().to_string()));
    item
}

/// DynamoDB アイテムを Car に変換する
fn convert_item_to_car(item: &HashMap<String, AttributeValue>) -> Result<Car, InfraError> {
    let id = CarId::parse(get_s(item, CAR_KEY_ATTRIBUTE)?)
        .map_err(|e| InfraError::decode(format!("id のパースに失敗: {e}")))?;
    let make = get_s(item, "make")?;
    let model = get_s(item, "model")?;
    let year: i64 = get_n(item, "year")?
        .parse()
        .map_err(|e| InfraError::decode(format!("year のパースに失敗: {e}")))?;

    Ok(Car::new(id, make, model, year))
}

/// DynamoDB アイテムから文字列属性を取得する
fn get_s(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, InfraError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| InfraError::decode(format!("属性 '{key}' が見つかりません")))
}

/// DynamoDB アイテムから数値属性を取得する
fn get_n(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, InfraError> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .cloned()
        .ok_or_else(|| InfraError::decode(format!("数値属性 '{key}' が見つかりません")))
}
