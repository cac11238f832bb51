//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::api::{ConversionRequest, SheetSelector};
use crate::error::XlsxJsonError;
use crate::flatten::flatten_workbook;
use crate::parser::WorkbookParser;
use crate::qa::{reshape, QaFields};
use crate::security::SecurityConfig;
use crate::source::ContentAcquirer;
use crate::types::{ConversionResult, QaItem};

/// ダウンロードタイムアウトのデフォルト値
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// ダウンロード全体のタイムアウト
    pub download_timeout: Duration,

    /// 入力サイズ制限
    pub security: SecurityConfig,

    /// QA変換の予約フィールド名
    pub qa_fields: QaFields,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            security: SecurityConfig::default(),
            qa_fields: QaFields::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use std::time::Duration;
/// use xlsxjson::{ConverterBuilder, QaFields};
///
/// # fn main() -> Result<(), xlsxjson::XlsxJsonError> {
/// let converter = ConverterBuilder::new()
///     .with_download_timeout(Duration::from_secs(10))
///     .with_qa_fields(QaFields::new("Name", "Score"))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - ダウンロードタイムアウト: 30秒
    /// - 入力サイズ上限: 100MB
    /// - 予約フィールド名: `姓名` / `客观题得分`
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// ダウンロードのタイムアウトを指定する
    ///
    /// タイムアウトは他のダウンロード失敗と同様に扱われます。
    pub fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.config.download_timeout = timeout;
        self
    }

    /// 入力サイズの上限（バイト）を指定する
    pub fn with_max_input_bytes(mut self, max_input_bytes: u64) -> Self {
        self.config.security.max_input_bytes = max_input_bytes;
        self
    }

    /// QA変換の予約フィールド名を指定する
    pub fn with_qa_fields(mut self, fields: QaFields) -> Self {
        self.config.qa_fields = fields;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxJsonError::Config(String)`: 設定の検証に失敗した場合
    ///   * タイムアウトが0
    ///   * 入力サイズ上限が0
    ///   * 予約フィールド名が空、または同一
    pub fn build(self) -> Result<Converter, XlsxJsonError> {
        // 1. タイムアウトの検証
        if self.config.download_timeout.is_zero() {
            return Err(XlsxJsonError::Config(
                "Download timeout must be greater than zero".to_string(),
            ));
        }

        // 2. サイズ上限の検証
        if self.config.security.max_input_bytes == 0 {
            return Err(XlsxJsonError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        // 3. 予約フィールド名の検証
        let fields = &self.config.qa_fields;
        if fields.name_field.is_empty() || fields.score_field.is_empty() {
            return Err(XlsxJsonError::Config(
                "QA name and score fields must not be empty".to_string(),
            ));
        }
        if fields.name_field == fields.score_field {
            return Err(XlsxJsonError::Config(format!(
                "QA name and score fields must differ: '{}'",
                fields.name_field
            )));
        }

        // 4. Converterインスタンス生成
        Converter::new(self.config)
    }
}

/// 変換処理のファサード
///
/// プロセスごとに1回構築され、リクエスト間で共有されます。
/// 可変状態を持たないため、並行するリクエストが互いに干渉することはありません。
///
/// 処理の流れ: 取得 → 解析 → フラット化 →（QAの場合）組み替え
#[derive(Debug, Clone)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// コンテンツ取得器
    acquirer: ContentAcquirer,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Result<Self, XlsxJsonError> {
        let acquirer = ContentAcquirer::new(config.download_timeout, config.security)?;
        Ok(Self { config, acquirer })
    }

    /// QA変換の予約フィールド名
    pub fn qa_fields(&self) -> &QaFields {
        &self.config.qa_fields
    }

    /// リクエストからワークブックのバイト列を取得する
    ///
    /// 取得元が指定されていない場合は、ネットワークアクセスの前に
    /// `XlsxJsonError::InvalidInput`を返します。
    pub async fn acquire(&self, request: &ConversionRequest) -> Result<Vec<u8>, XlsxJsonError> {
        let source = request.source()?;
        self.acquirer.acquire(source).await
    }

    /// バイト列を解析して変換する（同期処理）
    ///
    /// # 引数
    ///
    /// * `bytes` - Excelファイルのバイト列
    /// * `selector` - シート選択方式
    /// * `header_row` - 先頭行をフィールド名として使用するか
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        selector: &SheetSelector,
        header_row: bool,
    ) -> Result<ConversionResult, XlsxJsonError> {
        parse_and_flatten(bytes, selector, header_row)
    }

    /// リクエストを処理し、シート名 → レコード列の変換結果を返す
    ///
    /// 解析とフラット化はブロッキングスレッドで実行されます。
    /// いずれかの段階で失敗した場合、部分的な結果は返しません。
    pub async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, XlsxJsonError> {
        let bytes = self.acquire(request).await?;
        let selector = request.sheet_selector();
        let header_row = request.header_row;

        let result = tokio::task::spawn_blocking(move || {
            parse_and_flatten(&bytes, &selector, header_row)
        })
        .await
        .map_err(|e| XlsxJsonError::Internal(format!("Conversion task failed: {}", e)))??;

        info!(
            sheets = result.len(),
            records = result.values().map(Vec::len).sum::<usize>(),
            "converted workbook"
        );
        Ok(result)
    }

    /// リクエストを処理し、設問・回答の組を返す
    pub async fn convert_qa(&self, request: &ConversionRequest) -> Result<Vec<QaItem>, XlsxJsonError> {
        let result = self.convert(request).await?;
        let items = reshape(&result, &self.config.qa_fields);

        info!(items = items.len(), "reshaped workbook into QA items");
        Ok(items)
    }

    /// 変換結果をJSON文字列として返す
    pub async fn convert_to_string(
        &self,
        request: &ConversionRequest,
    ) -> Result<String, XlsxJsonError> {
        let result = self.convert(request).await?;
        to_json_string(&result)
    }

    /// 設問・回答の組をJSON文字列として返す
    pub async fn convert_qa_to_string(
        &self,
        request: &ConversionRequest,
    ) -> Result<String, XlsxJsonError> {
        let items = self.convert_qa(request).await?;
        to_json_string(&items)
    }
}

/// 解析とフラット化
fn parse_and_flatten(
    bytes: &[u8],
    selector: &SheetSelector,
    header_row: bool,
) -> Result<ConversionResult, XlsxJsonError> {
    let mut parser = WorkbookParser::open(bytes)?;
    let workbook = parser.read_workbook(selector)?;
    debug!(sheets = ?workbook.sheet_names(), "parsed workbook");

    Ok(flatten_workbook(&workbook, header_row))
}

/// 挿入順と非ASCII文字を保持したままJSON文字列に変換
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, XlsxJsonError> {
    Ok(serde_json::to_string(value)?)
}
