//! Source Module
//!
//! ワークブックのバイト列を取得するモジュール。
//! URLからのHTTP GET、またはbase64文字列のデコードのどちらかで取得します。

use std::time::Duration;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use tracing::debug;

use crate::api::ContentSource;
use crate::error::XlsxJsonError;
use crate::security::SecurityConfig;

/// パディングの有無を問わないbase64エンジン
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// コンテンツ取得器
///
/// `reqwest::Client`を保持し、リクエスト間で共有されます。
/// 可変状態は持ちません。
#[derive(Debug, Clone)]
pub(crate) struct ContentAcquirer {
    client: reqwest::Client,
    security: SecurityConfig,
}

impl ContentAcquirer {
    /// 新しい取得器を生成
    ///
    /// # 引数
    ///
    /// * `timeout` - ダウンロード全体のタイムアウト
    /// * `security` - 入力サイズ制限
    pub fn new(timeout: Duration, security: SecurityConfig) -> Result<Self, XlsxJsonError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| XlsxJsonError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, security })
    }

    /// 取得元からバイト列を取得する
    ///
    /// URLの場合のみネットワークアクセスが発生します。リトライは行いません。
    pub async fn acquire(&self, source: ContentSource<'_>) -> Result<Vec<u8>, XlsxJsonError> {
        match source {
            ContentSource::Url(url) => self.download(url).await,
            ContentSource::Base64(data) => self.decode(data),
        }
    }

    /// URLからダウンロードする
    ///
    /// タイムアウト、ネットワークエラー、成功以外のステータスはすべて
    /// `XlsxJsonError::Download`になります。
    async fn download(&self, url: &str) -> Result<Vec<u8>, XlsxJsonError> {
        debug!(url, "downloading workbook");

        let response = self.client.get(url).send().await?.error_for_status()?;

        if let Some(length) = response.content_length() {
            self.security.check_input_size(length)?;
        }

        let bytes = response.bytes().await?;
        self.security.check_input_size(bytes.len() as u64)?;

        debug!(url, bytes = bytes.len(), "download finished");
        Ok(bytes.to_vec())
    }

    /// base64文字列をデコードする
    fn decode(&self, data: &str) -> Result<Vec<u8>, XlsxJsonError> {
        self.security
            .check_input_size(SecurityConfig::estimated_decoded_size(data.len()))?;

        let bytes = decode_base64(data)?;
        self.security.check_input_size(bytes.len() as u64)?;

        debug!(bytes = bytes.len(), "decoded base64 payload");
        Ok(bytes)
    }
}

/// base64文字列をデコードする
///
/// 改行などの空白文字は無視し、末尾のパディングは省略可能です。
pub fn decode_base64(data: &str) -> Result<Vec<u8>, XlsxJsonError> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(BASE64_LENIENT.decode(compact)?)
}
