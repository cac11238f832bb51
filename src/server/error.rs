//! HTTPエラー応答

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::error::XlsxJsonError;

/// ハンドラーが返すエラー
///
/// クライアントエラーは`{"detail": "<メッセージ>"}`と400で応答します。
/// 内部エラーの詳細はログにのみ出力されます。
#[derive(Debug)]
pub struct ApiError(pub XlsxJsonError);

impl From<XlsxJsonError> for ApiError {
    fn from(error: XlsxJsonError) -> Self {
        ApiError(error)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(XlsxJsonError::InvalidInput(rejection.body_text()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(XlsxJsonError::InvalidInput(rejection.body_text()))
    }
}

impl ApiError {
    /// 応答ステータス
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status == StatusCode::BAD_REQUEST {
            warn!(error = %self.0, "rejected conversion request");
            self.0.to_string()
        } else {
            error!(error = %self.0, "conversion failed");
            "Internal Server Error".to_string()
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
