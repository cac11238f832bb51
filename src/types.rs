//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! すべての値はリクエストごとに生成され、レスポンスのシリアライズ後に破棄されます。

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// セルの値を表す列挙型
///
/// JSONのスカラー値にそのまま対応します（`Null`は`null`として出力）。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// 空セル
    #[default]
    Null,

    /// 論理値
    Bool(bool),

    /// 整数（小数部のない数値）
    Int(i64),

    /// 浮動小数点数
    Float(f64),

    /// 文字列
    String(String),
}

impl CellValue {
    /// ヘッダーセルとしてのフィールド名を取得
    ///
    /// 空セルおよび空文字列の場合は`None`を返します。
    pub fn as_header(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::String(s) if s.is_empty() => None,
            CellValue::String(s) => Some(s.clone()),
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(f.to_string()),
            CellValue::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// 1行分のセル値
pub type Row = Vec<CellValue>;

/// フィールド名からセル値へのマッピング（列順を保持）
pub type FlatRecord = IndexMap<String, CellValue>;

/// シート名からレコード列へのマッピング（ワークブック順を保持）
pub type ConversionResult = IndexMap<String, Vec<FlatRecord>>;

/// A1を起点とするシートのグリッド
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    /// シート名
    pub name: String,

    /// 行のリスト（行順）
    pub rows: Vec<Row>,
}

impl Sheet {
    /// 新しいシートを生成
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// 最も長い行の長さ
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// 解析済みのワークブック（シートはワークブック順）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// シート名のリストを取得
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// 設問・回答の組
///
/// 回答者（2行目以降のレコード）とフィールドの組ごとに1件生成されます。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaItem {
    /// シート名
    pub sheet: String,

    /// 回答者名（氏名フィールドの値）
    pub name: CellValue,

    /// フィールド名
    pub field: String,

    /// 設問（設問行の値）
    pub question: CellValue,

    /// 回答（回答者の値）
    pub answer: CellValue,

    /// 得点（得点フィールドの値）
    pub score: CellValue,
}
