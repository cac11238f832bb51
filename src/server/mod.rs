//! Server Module
//!
//! 変換処理をHTTPエンドポイントとして公開するモジュール。
//!
//! | メソッド | パス | 応答 |
//! | --- | --- | --- |
//! | GET | `/health` | `{"status": "ok"}` |
//! | GET / POST | `/convert` | `{"sheets": "<JSON文字列>"}` |
//! | GET / POST | `/convert_qa` | `{"items": "<JSON文字列>"}` |
//!
//! 入力エラー・ダウンロード失敗・解析失敗・シート未検出は400、
//! それ以外の内部エラーは500として応答します。

mod error;
mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::builder::Converter;

pub use error::ApiError;
pub use handlers::{ConvertQaResponse, ConvertResponse, HealthResponse};

/// ルーターを構築する
///
/// `Converter`はすべてのリクエストで共有されます。
pub fn build_router(converter: Arc<Converter>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/convert",
            get(handlers::convert_query).post(handlers::convert_body),
        )
        .route(
            "/convert_qa",
            get(handlers::convert_qa_query).post(handlers::convert_qa_body),
        )
        .with_state(converter)
}
