//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxjsonクレート全体で使用するエラー型
///
/// コンテンツの取得、ワークブックの解析、JSONへの変換処理中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
/// `Display`の出力はHTTPレスポンスの`detail`としてそのまま使用されます。
///
/// # エラーの分類
///
/// - クライアントエラー（400）: `InvalidInput`, `InvalidBase64`, `Download`, `Parse`,
///   `UnsupportedFormat`, `SheetNotFound`, `SecurityViolation`
/// - 内部エラー（500）: `Config`, `Serialize`, `Io`, `Internal`
///
/// # 使用例
///
/// ```rust
/// use xlsxjson::XlsxJsonError;
///
/// let error = XlsxJsonError::SheetNotFound("Summary".to_string());
/// assert!(error.is_client_error());
/// assert_eq!(error.to_string(), "Sheet 'Summary' not found in workbook.");
/// ```
#[derive(Error, Debug)]
pub enum XlsxJsonError {
    /// 入力が不正な場合（取得元の指定なしなど）
    #[error("{0}")]
    InvalidInput(String),

    /// base64文字列のデコードに失敗したエラー
    ///
    /// `#[from]`属性により、`base64::DecodeError`から自動的に変換されます。
    #[error("Invalid base64 content: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// URLからのダウンロードに失敗したエラー
    ///
    /// ネットワークエラー、タイムアウト、成功以外のステータスコードを含みます。
    /// リトライは行いません。
    #[error("Failed to download file from URL: {0}")]
    Download(#[from] reqwest::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// calamineクレートがExcelファイルを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// XLSX以外の形式が渡された場合
    #[error("Failed to parse Excel file: {0}")]
    UnsupportedFormat(String),

    /// 指定されたシートがワークブックに存在しない
    #[error("Sheet '{0}' not found in workbook.")]
    SheetNotFound(String),

    /// 入力サイズ制限に違反したエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSONシリアライズに失敗したエラー
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 変換タスクの異常終了など、予期しない内部エラー
    #[error("Internal error: {0}")]
    Internal(String),
}

impl XlsxJsonError {
    /// 取得元が指定されていない場合のエラーを生成
    pub(crate) fn missing_source() -> Self {
        XlsxJsonError::InvalidInput("Either file_url or file_base64 must be provided.".to_string())
    }

    /// 呼び出し側の入力に起因するエラーかどうか
    ///
    /// `true`の場合は400、`false`の場合は500として応答します。
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            XlsxJsonError::Config(_)
                | XlsxJsonError::Serialize(_)
                | XlsxJsonError::Io(_)
                | XlsxJsonError::Internal(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use std::io;

    #[test]
    fn test_missing_source_message() {
        let error = XlsxJsonError::missing_source();
        assert_eq!(
            error.to_string(),
            "Either file_url or file_base64 must be provided."
        );
        assert!(error.is_client_error());
    }

    #[test]
    fn test_invalid_base64_error() {
        let decode_err = base64::engine::general_purpose::STANDARD
            .decode("not base64!!")
            .unwrap_err();
        let error: XlsxJsonError = decode_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.starts_with("Invalid base64 content: "));
        assert!(error.is_client_error());
    }

    #[test]
    fn test_parse_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: XlsxJsonError = parse_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse Excel file"));
        assert!(error_msg.contains("Corrupted file"));
        assert!(error.is_client_error());
    }

    #[test]
    fn test_sheet_not_found_display() {
        let error = XlsxJsonError::SheetNotFound("成績".to_string());
        assert_eq!(error.to_string(), "Sheet '成績' not found in workbook.");
    }

    #[test]
    fn test_internal_errors_are_not_client_errors() {
        let io_err: XlsxJsonError = io::Error::other("disk").into();
        assert!(!io_err.is_client_error());
        assert!(io_err.to_string().starts_with("IO error"));

        let config_err = XlsxJsonError::Config("bad".to_string());
        assert!(!config_err.is_client_error());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let serialize_err: XlsxJsonError = json_err.into();
        assert!(!serialize_err.is_client_error());

        let internal_err = XlsxJsonError::Internal("task panicked".to_string());
        assert!(!internal_err.is_client_error());
    }

    #[test]
    fn test_error_conversion_with_question_mark() {
        fn decode(input: &str) -> Result<Vec<u8>, XlsxJsonError> {
            Ok(base64::engine::general_purpose::STANDARD.decode(input)?)
        }

        match decode("%%%") {
            Err(XlsxJsonError::InvalidBase64(_)) => {}
            _ => panic!("Expected InvalidBase64 error from ? operator"),
        }
    }
}
