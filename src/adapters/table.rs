use crate::domain::model::{RawRow, MIN_ROW_CELLS};
use crate::utils::error::RenderError;
use scraper::{Html, Selector};

/// 服務通道表格，以 aria-label 定位而非位置
pub const SERVICING_TABLE_SELECTOR: &str = r#"table[aria-label="Servicing channels"]"#;

const ROW_SELECTOR: &str = r#"table[aria-label="Servicing channels"] tbody tr"#;
const CELL_SELECTOR: &str = "td";

fn selector(pattern: &str) -> Result<Selector, RenderError> {
    Selector::parse(pattern).map_err(|_| RenderError::InvalidSelector(pattern.to_string()))
}

/// 從已渲染的 HTML 抽出表格各列。表格不存在時回傳 `TableNotFound`。
pub fn extract_rows(url: &str, html: &str) -> Result<Vec<RawRow>, RenderError> {
    let document = Html::parse_document(html);
    let table = selector(SERVICING_TABLE_SELECTOR)?;
    let rows = selector(ROW_SELECTOR)?;
    let cells = selector(CELL_SELECTOR)?;

    if document.select(&table).next().is_none() {
        return Err(RenderError::TableNotFound {
            url: url.to_string(),
            selector: SERVICING_TABLE_SELECTOR.to_string(),
        });
    }

    let extracted: Vec<RawRow> = document
        .select(&rows)
        .map(|row| {
            row.select(&cells)
                .map(|cell| normalize_text(&cell.text().collect::<String>()))
                .collect::<RawRow>()
        })
        .filter(|row| row.len() >= MIN_ROW_CELLS)
        .collect();

    tracing::debug!("Extracted {} table rows from {}", extracted.len(), url);
    Ok(extracted)
}

// 類似瀏覽器 innerText：先串接整格文字，再合併連續空白並去頭尾
fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
