//! HTTPハンドラー

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::ConversionRequest;
use crate::builder::Converter;

use super::ApiError;

/// ヘルスチェックの応答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// `/convert`の応答
///
/// `sheets`はシート名 → レコード列をエンコードしたJSON文字列です。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub sheets: String,
}

/// `/convert_qa`の応答
///
/// `items`は設問・回答の組の配列をエンコードしたJSON文字列です。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertQaResponse {
    pub items: String,
}

pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[instrument(skip_all)]
pub(super) async fn convert_query(
    State(converter): State<Arc<Converter>>,
    query: Result<Query<ConversionRequest>, QueryRejection>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let Query(request) = query?;
    convert(&converter, &request).await
}

#[instrument(skip_all)]
pub(super) async fn convert_body(
    State(converter): State<Arc<Converter>>,
    body: Result<Json<ConversionRequest>, JsonRejection>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let Json(request) = body?;
    convert(&converter, &request).await
}

#[instrument(skip_all)]
pub(super) async fn convert_qa_query(
    State(converter): State<Arc<Converter>>,
    query: Result<Query<ConversionRequest>, QueryRejection>,
) -> Result<Json<ConvertQaResponse>, ApiError> {
    let Query(request) = query?;
    convert_qa(&converter, &request).await
}

#[instrument(skip_all)]
pub(super) async fn convert_qa_body(
    State(converter): State<Arc<Converter>>,
    body: Result<Json<ConversionRequest>, JsonRejection>,
) -> Result<Json<ConvertQaResponse>, ApiError> {
    let Json(request) = body?;
    convert_qa(&converter, &request).await
}

async fn convert(
    converter: &Converter,
    request: &ConversionRequest,
) -> Result<Json<ConvertResponse>, ApiError> {
    let sheets = converter.convert_to_string(request).await?;
    Ok(Json(ConvertResponse { sheets }))
}

async fn convert_qa(
    converter: &Converter,
    request: &ConversionRequest,
) -> Result<Json<ConvertQaResponse>, ApiError> {
    let items = converter.convert_qa_to_string(request).await?;
    Ok(Json(ConvertQaResponse { items }))
}
