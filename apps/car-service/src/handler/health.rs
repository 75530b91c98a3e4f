//! # ヘルスチェックハンドラ
//!
//! Car Service の稼働状態を確認するためのエンドポイント。
//!
//! - `/health` - Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` - Readiness Check（DynamoDB への到達性を確認）
//!
//! レスポンス型は [`oldcars_shared::HealthResponse`] / [`oldcars_shared::ReadinessResponse`] を参照。

use std::{sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use oldcars_infra::pool::DynamoDbPool;
use oldcars_shared::{CheckStatus, HealthResponse, ReadinessResponse};

/// Car Service のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub pool: DynamoDbPool,
}

/// Car Service の Readiness Check エンドポイント
///
/// DynamoDB に到達できれば 200、できなければ 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let dynamodb = check_dynamodb(&state.pool).await;
    let response = ReadinessResponse::from_checks([("dynamodb", dynamodb)]);

    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

/// DynamoDB への到達性を確認する（タイムアウト: 5 秒）
async fn check_dynamodb(pool: &DynamoDbPool) -> CheckStatus {
    match tokio::time::timeout(Duration::from_secs(5), pool.ping()).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: dynamodb ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: dynamodb check timed out");
            CheckStatus::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::config::{BehaviorVersion, Region, retry::RetryConfig};
    use axum::{Router, body::Body, http::Request, routing::get};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    /// 接続先が存在しないクライアントでプールを作る
    fn unreachable_pool() -> DynamoDbPool {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("ap-northeast-1"))
            .endpoint_url("http://127.0.0.1:1")
            .retry_config(RetryConfig::disabled())
            .build();
        DynamoDbPool::new(aws_sdk_dynamodb::Client::from_conf(config), 1)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_checkはhealthyとバージョンを返す() {
        let app = Router::new().route("/health", get(health_check));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_readiness_check_dynamodbに到達できなければ503() {
        let state = Arc::new(ReadinessState {
            pool: unreachable_pool(),
        });
        let app = Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(state);

        let response = app
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["status"], "not_ready");
        assert_eq!(json["checks"]["dynamodb"], "error");
    }
}
