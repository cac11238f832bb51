//! Security Module
//!
//! 入力サイズの制限を提供するモジュール。
//! ダウンロードまたはデコードされたバイト列は、解析前にこの制限で検証されます。

use crate::error::XlsxJsonError;

/// 入力ファイルの最大サイズのデフォルト値（100MB）
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 104_857_600;

/// セキュリティ設定
///
/// 入力処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_input_bytes: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl SecurityConfig {
    /// 入力サイズを検証
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 制限内の場合
    /// * `Err(XlsxJsonError::SecurityViolation)` - 制限を超えた場合
    pub fn check_input_size(&self, size: u64) -> Result<(), XlsxJsonError> {
        if size > self.max_input_bytes {
            return Err(XlsxJsonError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                size, self.max_input_bytes
            )));
        }
        Ok(())
    }

    /// base64文字列のデコード後のおおよそのサイズ
    ///
    /// デコード前に巨大な入力を拒否するために使用します。
    pub fn estimated_decoded_size(encoded_len: usize) -> u64 {
        (encoded_len as u64 / 4) * 3
    }
}
