//! 页面渲染
//!
//! 把会话快照渲染成终端文本，不修改任何状态

use crate::models::{ExtractionMode, OrderRecord, Page, ResultSet};
use crate::workflow::Session;
use std::fmt::Write;

const CELL_WIDTH: usize = 18;

/// 渲染当前页面
pub fn render_page(session: &Session) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "─".repeat(60));

    match session.page {
        Page::Home => {
            let _ = writeln!(out, "OrderIQ");
            let _ = writeln!(out, "AI-powered order extraction from emails and faxes");
            let _ = writeln!(out, "\n  start  开始提取");
        }
        Page::Selection => {
            let _ = writeln!(out, "Choose Extraction Method");
            let _ = writeln!(out, "\n  text   从文本提取（邮件、消息）");
            let _ = writeln!(out, "  image  从图片提取（传真、扫描件）");
            let _ = writeln!(out, "  back   返回首页");
        }
        Page::Extraction => render_extraction(&mut out, session),
        Page::Results => render_results_page(&mut out, session),
    }

    if let Some(error) = &session.last_error {
        let _ = writeln!(out, "\n❌ {}", error);
    }
    out
}

fn render_extraction(out: &mut String, session: &Session) {
    match session.mode {
        Some(ExtractionMode::Text) => {
            let _ = writeln!(out, "Text Extraction");
            let text = session.input.text();
            if text.trim().is_empty() {
                let _ = writeln!(out, "  (尚未输入文本)");
            } else {
                for line in text.lines() {
                    let _ = writeln!(out, "  │ {}", line);
                }
            }
            let _ = writeln!(out, "\n  type <文本> | paste | clear | submit | back");
        }
        Some(ExtractionMode::Image) => {
            let _ = writeln!(out, "Image Extraction");
            match session.input.file_name() {
                Some(name) => {
                    let _ = writeln!(out, "  已选择: {}", name);
                }
                None => {
                    let _ = writeln!(out, "  (尚未选择文件)");
                }
            }
            let _ = writeln!(out, "\n  file <路径> | drop <路径>... | clear | submit | back");
        }
        None => {
            let _ = writeln!(out, "  (未选择提取方式)");
        }
    }

    if session.in_flight {
        let _ = writeln!(out, "\n⏳ 正在处理，请稍候...");
    }
}

fn render_results_page(out: &mut String, session: &Session) {
    let _ = writeln!(out, "Extracted Order Details");
    if let Some(notice) = &session.notice {
        let _ = writeln!(out, "⚠️ 服务端提示: {}", notice);
    }
    match &session.last_results {
        Some(results) => out.push_str(&render_results(results)),
        None => {
            let _ = writeln!(out, "  (尚无结果)");
        }
    }
    let _ = writeln!(out, "\n  export | back");
    if session.in_flight {
        let _ = writeln!(out, "\n⏳ 正在导出，请稍候...");
    }
}

/// 渲染结果表格
pub fn render_results(results: &ResultSet) -> String {
    let mut out = String::new();
    if results.is_empty() {
        let _ = writeln!(out, "  未提取到订单");
        return out;
    }

    let header: Vec<String> = OrderRecord::COLUMNS.iter().map(|c| cell(c)).collect();
    let _ = writeln!(out, "  #  {}", header.join(" "));
    for (i, record) in results.iter().enumerate() {
        let row: Vec<String> = record.cells().iter().map(|c| cell(c)).collect();
        let badge = if record.cash_on_delivery { " [COD]" } else { "" };
        let _ = writeln!(out, "  {:<2} {}{}", i + 1, row.join(" "), badge);
    }
    let _ = writeln!(out, "\n  共 {} 条订单", results.len());
    out
}

fn cell(value: &str) -> String {
    let single_line = value.replace('\n', " ");
    let count = single_line.chars().count();
    if count > CELL_WIDTH {
        let truncated: String = single_line.chars().take(CELL_WIDTH - 1).collect();
        format!("{}…", truncated)
    } else {
        format!("{}{}", single_line, " ".repeat(CELL_WIDTH - count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawOrder, PLACEHOLDER};
    use crate::services::project;
    use serde_json::json;

    fn record(value: serde_json::Value) -> OrderRecord {
        project(&RawOrder::from_value(value))
    }

    #[test]
    fn results_table_keeps_order_and_marks_cod() {
        let results: ResultSet = vec![
            record(json!({"product": "Amul Butter", "payment_terms": "COD"})),
            record(json!({"product": "Fanta", "payment_terms": "Online Transfer"})),
        ]
        .into_iter()
        .collect();

        let table = render_results(&results);
        let butter = table.find("Amul Butter").unwrap();
        let fanta = table.find("Fanta").unwrap();
        assert!(butter < fanta);
        assert_eq!(table.matches("[COD]").count(), 1);
        assert!(table.contains(PLACEHOLDER));
    }

    #[test]
    fn empty_results_are_distinct_from_no_results() {
        let mut session = Session::new();
        session.page = Page::Results;
        assert!(render_page(&session).contains("尚无结果"));

        session.last_results = Some(ResultSet::default());
        assert!(render_page(&session).contains("未提取到订单"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "Flat 204, Sunrise Apartments, Sector 21, Noida";
        assert_eq!(cell(long).chars().count(), CELL_WIDTH);
        assert!(cell(long).ends_with('…'));
    }
}
