//! Flatten Module
//!
//! シートのグリッドを、フィールド名をキーとするレコード列に変換するモジュール。
//! 解析が成功した後の処理であり、失敗することはありません。

use rayon::prelude::*;

use crate::types::{CellValue, ConversionResult, FlatRecord, Row, Sheet, Workbook};

/// 位置ベースのフィールド名を生成（0始まりのインデックス → `col_<n>`）
pub fn positional_name(index: usize) -> String {
    format!("col_{}", index + 1)
}

/// ヘッダー行からフィールド名を生成
///
/// 空セルは`col_<n>`になります。重複した名前はそのまま残ります。
pub fn header_names(header: &[CellValue]) -> Vec<String> {
    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| cell.as_header().unwrap_or_else(|| positional_name(idx)))
        .collect()
}

/// シートをレコード列に変換する
///
/// * `header_row = true`: 先頭行がフィールド名、2行目以降がデータ
/// * `header_row = false`: フィールド名は`col_1..col_<最大行長>`、全行がデータ
///
/// 行がフィールド数より短い場合は`null`で埋め、長い場合は超過分を無視します。
/// 同じフィールド名が複数ある場合は、後の列の値が残ります。
pub fn flatten_sheet(sheet: &Sheet, header_row: bool) -> Vec<FlatRecord> {
    let Some(first) = sheet.rows.first() else {
        return Vec::new();
    };

    let (headers, data_rows) = if header_row {
        (header_names(first), &sheet.rows[1..])
    } else {
        let headers: Vec<String> = (0..sheet.width()).map(positional_name).collect();
        (headers, &sheet.rows[..])
    };

    data_rows
        .iter()
        .map(|row| flatten_row(&headers, row))
        .collect()
}

/// 1行をレコードに変換
fn flatten_row(headers: &[String], row: &Row) -> FlatRecord {
    let mut record = FlatRecord::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let value = row.get(idx).cloned().unwrap_or(CellValue::Null);
        record.insert(header.clone(), value);
    }
    record
}

/// ワークブックのすべてのシートを変換する
///
/// シートごとの変換は並列に実行されますが、結果はワークブック順に並びます。
pub fn flatten_workbook(workbook: &Workbook, header_row: bool) -> ConversionResult {
    let flattened: Vec<(String, Vec<FlatRecord>)> = workbook
        .sheets
        .par_iter()
        .map(|sheet| (sheet.name.clone(), flatten_sheet(sheet, header_row)))
        .collect();

    flattened.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cells(values: &[&str]) -> Row {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    fn record(pairs: &[(&str, CellValue)]) -> FlatRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_positional_name() {
        assert_eq!(positional_name(0), "col_1");
        assert_eq!(positional_name(9), "col_10");
    }

    #[test]
    fn test_header_names_with_empty_cells() {
        let header = vec![
            CellValue::from("A"),
            CellValue::Null,
            CellValue::Int(3),
            CellValue::from(""),
        ];
        assert_eq!(header_names(&header), vec!["A", "col_2", "3", "col_4"]);
    }

    #[test]
    fn test_flatten_with_header_row() {
        let sheet = Sheet::new("Sheet1", vec![cells(&["A", "B"]), cells(&["x", "y"])]);
        let records = flatten_sheet(&sheet, true);
        assert_eq!(
            records,
            vec![record(&[("A", "x".into()), ("B", "y".into())])]
        );
    }

    #[test]
    fn test_flatten_without_header_row() {
        let sheet = Sheet::new("Sheet1", vec![cells(&["A", "B"]), cells(&["x", "y"])]);
        let records = flatten_sheet(&sheet, false);
        assert_eq!(
            records,
            vec![
                record(&[("col_1", "A".into()), ("col_2", "B".into())]),
                record(&[("col_1", "x".into()), ("col_2", "y".into())]),
            ]
        );
    }

    #[test]
    fn test_flatten_empty_sheet() {
        let sheet = Sheet::new("Empty", vec![]);
        assert!(flatten_sheet(&sheet, true).is_empty());
        assert!(flatten_sheet(&sheet, false).is_empty());
    }

    #[test]
    fn test_flatten_header_only() {
        let sheet = Sheet::new("Sheet1", vec![cells(&["A", "B"])]);
        assert!(flatten_sheet(&sheet, true).is_empty());
    }

    #[test]
    fn test_short_rows_are_padded_with_null() {
        let sheet = Sheet::new(
            "Sheet1",
            vec![cells(&["A", "B", "C"]), cells(&["x"]), vec![]],
        );
        let records = flatten_sheet(&sheet, true);
        assert_eq!(
            records,
            vec![
                record(&[
                    ("A", "x".into()),
                    ("B", CellValue::Null),
                    ("C", CellValue::Null)
                ]),
                record(&[
                    ("A", CellValue::Null),
                    ("B", CellValue::Null),
                    ("C", CellValue::Null)
                ]),
            ]
        );
    }

    #[test]
    fn test_extra_cells_beyond_header_are_ignored() {
        let sheet = Sheet::new("Sheet1", vec![cells(&["A"]), cells(&["x", "y", "z"])]);
        let records = flatten_sheet(&sheet, true);
        assert_eq!(records, vec![record(&[("A", "x".into())])]);
    }

    #[test]
    fn test_without_header_uses_widest_row() {
        let sheet = Sheet::new("Sheet1", vec![cells(&["a"]), cells(&["b", "c", "d"])]);
        let records = flatten_sheet(&sheet, false);
        assert_eq!(
            records[0],
            record(&[
                ("col_1", "a".into()),
                ("col_2", CellValue::Null),
                ("col_3", CellValue::Null)
            ])
        );
        assert_eq!(records[1].len(), 3);
    }

    #[test]
    fn test_duplicate_header_last_column_wins() {
        let sheet = Sheet::new(
            "Sheet1",
            vec![cells(&["A", "B", "A"]), cells(&["1", "2", "3"])],
        );
        let records = flatten_sheet(&sheet, true);
        assert_eq!(records.len(), 1);
        // 位置は最初の列、値は最後の列
        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(records[0]["A"], CellValue::from("3"));
    }

    #[test]
    fn test_duplicate_between_header_and_positional_name() {
        let sheet = Sheet::new(
            "Sheet1",
            vec![
                vec![CellValue::from("col_2"), CellValue::Null],
                cells(&["first", "second"]),
            ],
        );
        let records = flatten_sheet(&sheet, true);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0]["col_2"], CellValue::from("second"));
    }

    #[test]
    fn test_flatten_workbook_preserves_sheet_order() {
        let workbook = Workbook {
            sheets: vec![
                Sheet::new("Zeta", vec![cells(&["A"]), cells(&["1"])]),
                Sheet::new("Alpha", vec![]),
                Sheet::new("Mid", vec![cells(&["B"]), cells(&["2"]), cells(&["3"])]),
            ],
        };
        let result = flatten_workbook(&workbook, true);
        let names: Vec<&String> = result.keys().collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert!(result["Alpha"].is_empty());
        assert_eq!(result["Mid"].len(), 2);
    }

    proptest! {
        #[test]
        fn test_records_always_have_every_field(
            widths in proptest::collection::vec(0usize..8, 1..20),
            header_row in any::<bool>(),
        ) {
            let rows: Vec<Row> = widths
                .iter()
                .map(|w| (0..*w).map(|i| CellValue::Int(i as i64)).collect())
                .collect();
            let sheet = Sheet::new("Sheet1", rows);
            let records = flatten_sheet(&sheet, header_row);

            let expected_rows = if header_row { widths.len() - 1 } else { widths.len() };
            prop_assert_eq!(records.len(), expected_rows);

            let field_count = if header_row { widths[0] } else { sheet.width() };
            for record in &records {
                prop_assert!(record.len() <= field_count);
                if !header_row {
                    prop_assert_eq!(record.len(), field_count);
                }
            }
        }
    }
}
