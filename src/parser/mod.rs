//! Parser Module
//!
//! calamineを使用したExcelファイル解析のアダプター。
//! セルの値は数式ではなく、保存されている計算結果を使用します。

mod workbook;

pub use workbook::WorkbookParser;
