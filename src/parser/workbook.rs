//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックレベルの操作を提供します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets, Xlsx};
use chrono::NaiveDateTime;
use std::io::Cursor;

use crate::api::SheetSelector;
use crate::error::XlsxJsonError;
use crate::types::{CellValue, Row, Sheet, Workbook};

/// 日付セルの出力形式（ISO 8601）
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// ワークブックパーサー
///
/// 入力バイト列を借用して解析します。入力が書き換えられることはありません。
pub struct WorkbookParser<'a> {
    /// calamineのワークブック（XLSX形式のみサポート）
    workbook: Xlsx<Cursor<&'a [u8]>>,
}

impl<'a> WorkbookParser<'a> {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `bytes` - Excelファイルのバイト列
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxJsonError::Parse)` - バイト列がワークブックとして解析できない場合
    /// * `Err(XlsxJsonError::UnsupportedFormat)` - XLSX以外の形式の場合
    pub fn open(bytes: &'a [u8]) -> Result<Self, XlsxJsonError> {
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        match sheets {
            Sheets::Xlsx(workbook) => Ok(Self { workbook }),
            _ => Err(XlsxJsonError::UnsupportedFormat(
                "Only XLSX format is supported".to_string(),
            )),
        }
    }

    /// すべてのシート名をワークブック順に取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシートを選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<String>)` - 選択されたシート名のリスト
    /// * `Err(XlsxJsonError::SheetNotFound)` - 指定されたシートが存在しない場合
    pub fn select_sheets(&self, selector: &SheetSelector) -> Result<Vec<String>, XlsxJsonError> {
        let all_sheet_names = self.sheet_names();

        match selector {
            SheetSelector::All => Ok(all_sheet_names),

            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(XlsxJsonError::SheetNotFound(name.clone()));
                }
                Ok(vec![name.clone()])
            }
        }
    }

    /// シートを読み込み、A1を起点とするグリッドに変換する
    ///
    /// 最初の使用セルより前の空行・空列は`CellValue::Null`で埋められます。
    /// セルが1つもないシートは行なしのシートになります。
    pub fn read_sheet(&mut self, sheet_name: &str) -> Result<Sheet, XlsxJsonError> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| XlsxJsonError::Parse(e.into()))?;

        Ok(Sheet::new(sheet_name, anchored_rows(&range)))
    }

    /// 選択されたシートをワークブック順に読み込む
    pub fn read_workbook(&mut self, selector: &SheetSelector) -> Result<Workbook, XlsxJsonError> {
        let sheet_names = self.select_sheets(selector)?;

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in &sheet_names {
            sheets.push(self.read_sheet(sheet_name)?);
        }

        Ok(Workbook { sheets })
    }
}

/// calamineの範囲をA1起点の行リストに変換
fn anchored_rows(range: &Range<Data>) -> Vec<Row> {
    let (start_row, start_col) = match range.start() {
        Some(start) if !range.is_empty() => (start.0 as usize, start.1 as usize),
        _ => return Vec::new(),
    };
    let width = start_col + range.width();

    let mut rows = Vec::with_capacity(start_row + range.height());
    rows.extend((0..start_row).map(|_| vec![CellValue::Null; width]));

    for row in range.rows() {
        let mut cells = Vec::with_capacity(width);
        cells.resize(start_col, CellValue::Null);
        cells.extend(row.iter().map(cell_value));
        rows.push(cells);
    }

    rows
}

/// calamineのセルデータを`CellValue`に変換
pub(crate) fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => number_value(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::String(format_datetime(&datetime)),
            None => number_value(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
        #[allow(unreachable_patterns)]
        _ => CellValue::Null,
    }
}

fn format_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// 数値を変換（小数部がなければ整数）
fn number_value(f: f64) -> CellValue {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        CellValue::Int(f as i64)
    } else {
        CellValue::Float(f)
    }
}


// 実際のXLSXファイルを使用するテストは統合テスト（tests/）で実装します。
