//! Config Module
//!
//! コマンドライン引数と環境変数からサーバー設定を読み込むモジュール。

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::builder::{Converter, ConverterBuilder};
use crate::error::XlsxJsonError;
use crate::qa::{QaFields, DEFAULT_NAME_FIELD, DEFAULT_SCORE_FIELD};
use crate::security::DEFAULT_MAX_INPUT_BYTES;

/// デフォルトのログフィルター
pub const DEFAULT_LOG_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// サーバー設定
///
/// すべての項目は`XLSXJSON_*`環境変数でも指定できます。
#[derive(Debug, Clone, Parser)]
#[command(name = "xlsxjson", version, about = "Convert Excel workbooks to JSON over HTTP")]
pub struct ServerConfig {
    /// 待ち受けアドレス
    #[arg(long, env = "XLSXJSON_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// 待ち受けポート
    #[arg(long, env = "XLSXJSON_PORT", default_value_t = 8001)]
    pub port: u16,

    /// ダウンロードのタイムアウト（秒）
    #[arg(long, env = "XLSXJSON_DOWNLOAD_TIMEOUT_SECS", default_value_t = 30)]
    pub download_timeout_secs: u64,

    /// 入力ファイルの最大サイズ（バイト）
    #[arg(long, env = "XLSXJSON_MAX_INPUT_BYTES", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    pub max_input_bytes: u64,

    /// QA変換で回答者名として扱う列
    #[arg(long, env = "XLSXJSON_NAME_FIELD", default_value = DEFAULT_NAME_FIELD)]
    pub name_field: String,

    /// QA変換で得点として扱う列
    #[arg(long, env = "XLSXJSON_SCORE_FIELD", default_value = DEFAULT_SCORE_FIELD)]
    pub score_field: String,

    /// ログフィルター（未指定の場合は`RUST_LOG`、それもなければデフォルト）
    #[arg(long, env = "XLSXJSON_LOG_FILTER")]
    pub log_filter: Option<String>,
}

impl ServerConfig {
    /// 待ち受けアドレスを解決する
    pub fn socket_addr(&self) -> Result<SocketAddr, XlsxJsonError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                XlsxJsonError::Config(format!(
                    "Invalid listen address '{}:{}': {}",
                    self.host, self.port, e
                ))
            })
    }

    /// 設定から`Converter`を構築する
    pub fn converter(&self) -> Result<Converter, XlsxJsonError> {
        ConverterBuilder::new()
            .with_download_timeout(Duration::from_secs(self.download_timeout_secs))
            .with_max_input_bytes(self.max_input_bytes)
            .with_qa_fields(QaFields::new(&self.name_field, &self.score_field))
            .build()
    }
}
