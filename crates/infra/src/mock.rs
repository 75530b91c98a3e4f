//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! oldcars-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! DynamoDB 実装と同じ規約（重複挿入は `DuplicateKey`、存在しない ID の
//! 更新・削除・取得は `NotFound`）に従う。

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use oldcars_domain::car::{Car, CarId};

use crate::{
    error::InfraError,
    repository::{CarRepository, car_repository::CAR_ENTITY},
};

// ===== MockCarRepository =====

#[derive(Clone, Default)]
pub struct MockCarRepository {
    cars: Arc<Mutex<HashMap<CarId, Car>>>,
}

impl MockCarRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 事前データを投入する
    pub fn add_car(&self, car: Car) {
        self.cars.lock().unwrap().insert(car.id().clone(), car);
    }

    /// 保存されている車両数
    pub fn len(&self) -> usize {
        self.cars.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CarRepository for MockCarRepository {
    async fn insert(&self, car: &Car) -> Result<(), InfraError> {
        let mut cars = self.cars.lock().unwrap();
        if cars.contains_key(car.id()) {
            return Err(InfraError::duplicate_key(CAR_ENTITY, car.id().as_str()));
        }
        cars.insert(car.id().clone(), car.clone());
        Ok(())
    }

    async fn update(&self, car: &Car) -> Result<(), InfraError> {
        let mut cars = self.cars.lock().unwrap();
        match cars.get_mut(car.id()) {
            Some(stored) => {
                *stored = car.clone();
                Ok(())
            }
            None => Err(InfraError::not_found(CAR_ENTITY, car.id().as_str())),
        }
    }

    async fn delete(&self, id: &CarId) -> Result<(), InfraError> {
        self.cars
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| InfraError::not_found(CAR_ENTITY, id.as_str()))
    }

    async fn find_by_id(&self, id: &CarId) -> Result<Car, InfraError> {
        self.cars
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| InfraError::not_found(CAR_ENTITY, id.as_str()))
    }

    async fn find_all(&self) -> Result<Vec<Car>, InfraError> {
        Ok(self.cars.lock().unwrap().values().cloned().collect())
    }

    async fn find_classics(&self) -> Result<Vec<Car>, InfraError> {
        Ok(self
            .cars
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.is_classic())
            .cloned()
            .collect())
    }
}
