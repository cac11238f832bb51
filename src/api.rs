//! Public API Types
//!
//! 公開APIで使用するリクエスト型と列挙型を定義するモジュール。

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::XlsxJsonError;

/// 変換リクエスト
///
/// `POST /convert`のJSONボディ、および各エンドポイントのクエリパラメータに対応します。
/// すべてのフィールドは省略可能で、`header_row`のデフォルトは`true`です。
///
/// 空文字列は未指定として扱われます。
///
/// # 使用例
///
/// ```rust
/// use xlsxjson::ConversionRequest;
///
/// let request = ConversionRequest::from_base64("UEsDBA==")
///     .with_sheet_name("Sheet1")
///     .with_header_row(false);
/// assert!(!request.header_row);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// ダウンロード元のURL
    #[serde(default)]
    pub file_url: Option<String>,

    /// base64エンコードされたワークブック
    #[serde(default)]
    pub file_base64: Option<String>,

    /// 変換対象のシート名（未指定の場合はすべてのシート）
    #[serde(default)]
    pub sheet_name: Option<String>,

    /// 先頭行をフィールド名として使用するか
    ///
    /// `true`/`false`のほか、`1`/`0`、`yes`/`no`、`on`/`off`なども受け付けます。
    #[serde(default = "default_header_row", deserialize_with = "lenient_bool")]
    pub header_row: bool,
}

fn default_header_row() -> bool {
    true
}

/// 真偽値を表す文字列を解釈する（大文字・小文字は区別しない）
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "f" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientBoolVisitor;

    impl Visitor<'_> for LenientBoolVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a boolean such as true/false, 1/0, yes/no or on/off")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Unsigned(value), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Signed(value), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            parse_bool(value).ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(LenientBoolVisitor)
}

impl Default for ConversionRequest {
    fn default() -> Self {
        Self {
            file_url: None,
            file_base64: None,
            sheet_name: None,
            header_row: default_header_row(),
        }
    }
}

impl ConversionRequest {
    /// URLから取得するリクエストを生成
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            file_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// base64文字列から取得するリクエストを生成
    pub fn from_base64(data: impl Into<String>) -> Self {
        Self {
            file_base64: Some(data.into()),
            ..Self::default()
        }
    }

    /// 変換対象のシート名を指定する
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// 先頭行をヘッダーとして扱うかを指定する
    pub fn with_header_row(mut self, header_row: bool) -> Self {
        self.header_row = header_row;
        self
    }

    /// コンテンツの取得元を決定する
    ///
    /// URLとbase64の両方が指定された場合はURLが優先されます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(ContentSource)` - 取得元
    /// * `Err(XlsxJsonError::InvalidInput)` - どちらも指定されていない場合
    pub fn source(&self) -> Result<ContentSource<'_>, XlsxJsonError> {
        if let Some(url) = non_empty(&self.file_url) {
            return Ok(ContentSource::Url(url));
        }
        if let Some(data) = non_empty(&self.file_base64) {
            return Ok(ContentSource::Base64(data));
        }
        Err(XlsxJsonError::missing_source())
    }

    /// シート選択方式を取得する
    pub fn sheet_selector(&self) -> SheetSelector {
        match non_empty(&self.sheet_name) {
            Some(name) => SheetSelector::Name(name.to_string()),
            None => SheetSelector::All,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// コンテンツの取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource<'a> {
    /// HTTP GETでダウンロードする
    Url(&'a str),

    /// base64文字列をデコードする
    Base64(&'a str),
}

/// シート選択方式
///
/// 変換対象のシートを選択する方法を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelector {
    /// すべてのシートをワークブック順に変換（デフォルト）
    #[default]
    All,

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Sheet1".to_string())`
    Name(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let request = ConversionRequest::default();
        assert!(request.file_url.is_none());
        assert!(request.file_base64.is_none());
        assert!(request.sheet_name.is_none());
        assert!(request.header_row);
    }

    #[test]
    fn test_deserialize_applies_header_row_default() {
        let request: ConversionRequest =
            serde_json::from_str(r#"{"file_base64": "AAAA"}"#).unwrap();
        assert!(request.header_row);
        assert_eq!(request.file_base64.as_deref(), Some("AAAA"));

        let request: ConversionRequest =
            serde_json::from_str(r#"{"file_url": "http://x", "header_row": false}"#).unwrap();
        assert!(!request.header_row);
    }

    #[test]
    fn test_header_row_accepts_loose_booleans() {
        for (raw, expected) in [
            (r#""0""#, false),
            (r#""1""#, true),
            (r#""False""#, false),
            (r#""YES""#, true),
            (r#""no""#, false),
            (r#""off""#, false),
            ("0", false),
            ("1", true),
            ("true", true),
        ] {
            let json = format!(r#"{{"file_base64": "AAAA", "header_row": {}}}"#, raw);
            let request: ConversionRequest = serde_json::from_str(&json).unwrap();
            assert_eq!(request.header_row, expected, "header_row = {}", raw);
        }
    }

    #[test]
    fn test_header_row_rejects_unknown_values() {
        for raw in [r#""maybe""#, "2", r#""""#] {
            let json = format!(r#"{{"header_row": {}}}"#, raw);
            assert!(
                serde_json::from_str::<ConversionRequest>(&json).is_err(),
                "header_row = {}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(" On "), Some(true));
        assert_eq!(parse_bool("N"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }

    #[test]
    fn test_source_prefers_url() {
        let request = ConversionRequest {
            file_url: Some("http://example.com/a.xlsx".to_string()),
            file_base64: Some("AAAA".to_string()),
            ..ConversionRequest::default()
        };
        assert_eq!(
            request.source().unwrap(),
            ContentSource::Url("http://example.com/a.xlsx")
        );
    }

    #[test]
    fn test_source_falls_back_to_base64_when_url_empty() {
        let request = ConversionRequest {
            file_url: Some(String::new()),
            file_base64: Some("AAAA".to_string()),
            ..ConversionRequest::default()
        };
        assert_eq!(request.source().unwrap(), ContentSource::Base64("AAAA"));
    }

    #[test]
    fn test_source_missing() {
        let request = ConversionRequest::default();
        let result = request.source();
        match result {
            Err(XlsxJsonError::InvalidInput(msg)) => {
                assert!(msg.contains("file_url or file_base64"));
            }
            _ => panic!("Expected InvalidInput error"),
        }

        let empty = ConversionRequest::from_base64("");
        assert!(matches!(
            empty.source(),
            Err(XlsxJsonError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sheet_selector() {
        assert_eq!(
            ConversionRequest::default().sheet_selector(),
            SheetSelector::All
        );
        assert_eq!(
            ConversionRequest::default()
                .with_sheet_name("")
                .sheet_selector(),
            SheetSelector::All
        );
        assert_eq!(
            ConversionRequest::default()
                .with_sheet_name("Sheet2")
                .sheet_selector(),
            SheetSelector::Name("Sheet2".to_string())
        );
    }
}
