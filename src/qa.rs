//! QA Module
//!
//! 変換結果を設問・回答の組に組み替えるモジュール。
//!
//! 各シートの先頭レコードを設問行（フィールド → 設問文）とし、
//! 2件目以降のレコードを回答者ごとの回答として扱います。

use crate::types::{CellValue, ConversionResult, QaItem};

/// 回答者名フィールドのデフォルト名
pub const DEFAULT_NAME_FIELD: &str = "姓名";

/// 得点フィールドのデフォルト名
pub const DEFAULT_SCORE_FIELD: &str = "客观题得分";

/// 予約フィールド名
///
/// 回答者名と得点を保持する列の名前です。これらの列は設問として扱われません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaFields {
    /// 回答者名の列
    pub name_field: String,

    /// 得点の列
    pub score_field: String,
}

impl Default for QaFields {
    fn default() -> Self {
        Self {
            name_field: DEFAULT_NAME_FIELD.to_string(),
            score_field: DEFAULT_SCORE_FIELD.to_string(),
        }
    }
}

impl QaFields {
    /// 新しい予約フィールド名を生成
    pub fn new(name_field: impl Into<String>, score_field: impl Into<String>) -> Self {
        Self {
            name_field: name_field.into(),
            score_field: score_field.into(),
        }
    }

    /// 予約フィールドかどうか
    pub fn is_reserved(&self, field: &str) -> bool {
        field == self.name_field || field == self.score_field
    }
}

/// 変換結果を設問・回答の組に組み替える
///
/// 出力順はシート順、回答者（行）順、設問行のフィールド順です。
/// レコードのないシートは何も出力しません。
/// 回答者のレコードに予約フィールドがない場合、`name`/`score`は`null`になります。
pub fn reshape(result: &ConversionResult, fields: &QaFields) -> Vec<QaItem> {
    let mut items = Vec::new();

    for (sheet_name, records) in result {
        let Some((question_row, answer_rows)) = records.split_first() else {
            continue;
        };

        for answer_row in answer_rows {
            let name = lookup(answer_row.get(&fields.name_field));
            let score = lookup(answer_row.get(&fields.score_field));

            for (field, question) in question_row {
                if fields.is_reserved(field) {
                    continue;
                }

                items.push(QaItem {
                    sheet: sheet_name.clone(),
                    name: name.clone(),
                    field: field.clone(),
                    question: question.clone(),
                    answer: lookup(answer_row.get(field)),
                    score: score.clone(),
                });
            }
        }
    }

    items
}

fn lookup(value: Option<&CellValue>) -> CellValue {
    value.cloned().unwrap_or(CellValue::Null)
}
