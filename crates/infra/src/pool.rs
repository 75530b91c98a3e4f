//! # DynamoDB セッションプール
//!
//! プロセス全体で 1 つだけ作成し、リポジトリに注入するセッションの取得元。
//!
//! ## 設計方針
//!
//! - **操作単位の取得**: リポジトリの各操作は [`DynamoDbPool::acquire`] で
//!   専用の [`DynamoDbSession`] を取得し、操作の終了とともに手放す
//! - **ドロップで返却**: セッションはガード型であり、`?` による早期リターンや
//!   パニックを含むすべての経路でスロットが返却される
//! - **同時セッション数の上限**: `tokio::sync::Semaphore` で同時に発行する
//!   セッション数を制限する
//!
//! ```text
//! DynamoDbPool ──acquire()──▶ DynamoDbSession (Client のクローン + permit)
//!      ▲                                │
//!      └────────── drop で permit 返却 ──┘
//! ```

use std::{ops::Deref, sync::Arc};

use aws_sdk_dynamodb::Client;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::InfraError;

/// DynamoDB セッションプール
///
/// `Clone` は同じプールへのハンドルを複製する（permit は共有される）。
#[derive(Clone)]
pub struct DynamoDbPool {
    client:  Client,
    permits: Arc<Semaphore>,
}

impl DynamoDbPool {
    /// プールを作成する
    ///
    /// `max_sessions` が 0 の場合は 1 として扱う。
    pub fn new(client: Client, max_sessions: usize) -> Self {
        let max_sessions = max_sessions.max(1);
        Self {
            client,
            permits: Arc::new(Semaphore::new(max_sessions)),
        }
    }

    /// セッションを取得する
    ///
    /// 上限に達している場合は他のセッションが返却されるまで待機する。
    pub async fn acquire(&self) -> Result<DynamoDbSession, InfraError> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| InfraError::transport("セッションプールは既に閉じられています"))?;

        Ok(DynamoDbSession {
            client:  self.client.clone(),
            _permit: permit,
        })
    }

    /// ストアに到達できるか確認する
    ///
    /// readiness チェック用。`ListTables` を 1 件だけ要求する。
    pub async fn ping(&self) -> Result<(), InfraError> {
        let session = self.acquire().await?;
        session
            .list_tables()
            .limit(1)
            .send()
            .await
            .map_err(|e| InfraError::transport(format!("DynamoDB への疎通確認に失敗: {e}")))?;
        Ok(())
    }

    /// 現在取得可能なセッション数
    #[cfg(test)]
    fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

/// 1 操作の間だけ有効な DynamoDB セッション
///
/// `Deref<Target = Client>` により、そのまま SDK のクライアントとして使用できる。
pub struct DynamoDbSession {
    client:  Client,
    _permit: OwnedSemaphorePermit,
}

impl Deref for DynamoDbSession {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use aws_sdk_dynamodb::config::{BehaviorVersion, Region};

    use super::*;

    /// ネットワークに接続しないクライアント（送信しない限り通信は発生しない）
    fn offline_client() -> Client {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("ap-northeast-1"))
            .build();
        Client::from_conf(config)
    }

    #[tokio::test]
    async fn test_acquireでセッション数が減りdropで戻る() {
        let pool = DynamoDbPool::new(offline_client(), 2);
        assert_eq!(pool.available(), 2);

        let session = pool.acquire().await.unwrap();
        assert_eq!(pool.available(), 1);

        drop(session);
        assert_eq!(pool.available(), 2);
    }

    #[tokio::test]
    async fn test_上限に達するとセッションの返却まで待機する() {
        let pool = DynamoDbPool::new(offline_client(), 1);
        let first = pool.acquire().await.unwrap();

        let blocked = tokio::time::timeout(Duration::from_millis(50), pool.acquire()).await;
        assert!(blocked.is_err(), "上限到達中は取得できないこと");

        drop(first);

        let second = tokio::time::timeout(Duration::from_millis(50), pool.acquire()).await;
        assert!(second.is_ok(), "返却後は取得できること");
    }

    #[tokio::test]
    async fn test_早期リターンの経路でもセッションが返却される() {
        async fn failing_operation(pool: &DynamoDbPool) -> Result<(), InfraError> {
            let _session = pool.acquire().await?;
            Err(InfraError::transport("途中で失敗"))
        }

        let pool = DynamoDbPool::new(offline_client(), 3);
        let result = failing_operation(&pool).await;

        assert!(result.is_err());
        assert_eq!(pool.available(), 3);
    }

    #[tokio::test]
    async fn test_クローンしたプールは上限を共有する() {
        let pool = DynamoDbPool::new(offline_client(), 2);
        let cloned = pool.clone();

        let _session = cloned.acquire().await.unwrap();

        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_上限0は1として扱う() {
        let pool = DynamoDbPool::new(offline_client(), 0);
        assert_eq!(pool.available(), 1);
    }
}
