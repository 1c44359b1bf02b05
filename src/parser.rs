//! Scraping of portal responses.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Path segment the portal redirects to after a successful login.
pub const HOME_MARKER: &str = "homeExt.action";

static RESULT_ROWS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table.gridtable tbody tr").expect("row selector is valid CSS")
});
static CELLS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("cell selector is valid CSS"));

/// A login succeeded iff the redirect chain ended on the home page.
pub fn is_login_success(final_url: &str) -> bool {
    final_url.contains(HOME_MARKER)
}

/// Trims and collapses every whitespace run to a single space.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn cell_text(cell: ElementRef<'_>) -> String {
    normalize_ws(&cell.text().collect::<String>())
}

/// All body rows of the results table, one `Vec` of cell texts per row.
pub fn parse_result_rows(html: &str) -> Vec<Vec<String>> {
    let document = Html::parse_document(html);
    document
        .select(&RESULT_ROWS)
        .map(|tr| tr.select(&CELLS).map(cell_text).collect())
        .collect()
}

/// Classroom names (second column) in row order. Rows with fewer than two
/// cells, such as the "no data" placeholder row, are dropped.
pub fn parse_free_classroom_table(html: &str) -> Vec<String> {
    parse_result_rows(html)
        .into_iter()
        .filter_map(|row| {
            if row.len() < 2 {
                tracing::debug!(?row, "skipping short result row");
                return None;
            }
            row.into_iter().nth(1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> String {
        let body: String = rows
            .iter()
            .map(|cells| {
                let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
                format!("<tr>{tds}</tr>")
            })
            .collect();
        format!(
            r#"<html><body><table class="gridtable"><thead><tr><th>#</th><th>名称</th></tr></thead><tbody>{body}</tbody></table></body></html>"#
        )
    }

    #[test]
    fn second_cell_of_each_row_is_returned_in_order() {
        let html = table(&[&["1", "GX101", "120"], &["2", "GX102", "80"], &["3", "", "60"]]);
        assert_eq!(parse_free_classroom_table(&html), ["GX101", "GX102", ""]);
    }

    #[test]
    fn cell_text_is_trimmed_and_collapsed() {
        let html = table(&[&["1", "\n   GX\t 201  \n", "x"]]);
        assert_eq!(parse_free_classroom_table(&html), ["GX 201"]);
    }

    #[test]
    fn short_rows_are_dropped() {
        let html = table(&[&["1", "GX101"], &["no data"], &[]]);
        assert_eq!(parse_free_classroom_table(&html), ["GX101"]);
        assert_eq!(parse_result_rows(&html).len(), 3);
    }

    #[test]
    fn nested_markup_contributes_text() {
        let html = table(&[&["1", "<a href='#'><span>GX</span>301</a>"]]);
        assert_eq!(parse_free_classroom_table(&html), ["GX301"]);
    }

    #[test]
    fn missing_table_yields_nothing() {
        assert!(parse_free_classroom_table("<html><body>session expired</body></html>").is_empty());
        let other = r#"<table class="listtable"><tbody><tr><td>1</td><td>GX101</td></tr></tbody></table>"#;
        assert!(parse_free_classroom_table(other).is_empty());
    }

    #[test]
    fn login_success_depends_only_on_final_url() {
        assert!(is_login_success("https://jwxt.neuq.edu.cn/eams/homeExt.action"));
        assert!(is_login_success("http://127.0.0.1:9000/eams/homeExt.action?x=1"));
        assert!(!is_login_success("https://jwxt.neuq.edu.cn/eams/loginExt.action"));
        assert!(!is_login_success(""));
    }
}
