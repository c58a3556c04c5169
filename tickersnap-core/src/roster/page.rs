//! HTML table location and extraction.
//!
//! The reference page marks its data tables with the `wikitable sortable`
//! classes. The first such table is the company roster: one header row of
//! `<th>` cells followed by one `<tr>` of `<td>` cells per company.

use scraper::{Html, Selector};

use super::RosterError;

/// Class marker of the roster table on the source page.
const TABLE_MARKER: &str = "table.wikitable.sortable";

/// A header-keyed table of trimmed cell strings.
///
/// Invariant: every row in `rows` has exactly `headers.len()` cells —
/// [`extract_table`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Index of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

fn cell_text(cell: scraper::ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Locate the marked table and extract it as trimmed strings.
///
/// The first row supplies the column headers; every later row must match
/// the header width. Rows with no `<td>` cells at all (secondary header
/// rows) are skipped; a nonzero mismatch is a reported error rather than
/// silent column misalignment.
pub fn extract_table(html: &str) -> Result<RawTable, RosterError> {
    let document = Html::parse_document(html);

    let table = document
        .select(&selector(TABLE_MARKER))
        .next()
        .ok_or(RosterError::TableNotFound)?;

    let tr = selector("tr");
    let th = selector("th");
    let td = selector("td");

    let mut rows_iter = table.select(&tr);

    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row.select(&th).map(cell_text).collect(),
        None => return Err(RosterError::TableNotFound),
    };

    let mut rows = Vec::new();
    for (i, row) in rows_iter.enumerate() {
        let cells: Vec<String> = row.select(&td).map(cell_text).collect();
        if cells.is_empty() {
            continue;
        }
        if cells.len() != headers.len() {
            return Err(RosterError::RowShapeMismatch {
                row: i + 1,
                expected: headers.len(),
                found: cells.len(),
            });
        }
        rows.push(cells);
    }

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table class="infobox"><tr><td>not the roster</td></tr></table>
        <table class="wikitable sortable">
          <tr>
            <th> Símbolo </th><th>Seguridad</th><th>GICS Sector</th>
          </tr>
          <tr>
            <td>  AAPL </td><td>Apple Inc.</td><td>Information Technology</td>
          </tr>
          <tr>
            <td>MMM</td><td> 3M </td><td>Industrials</td>
          </tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn extracts_trimmed_headers_and_rows() {
        let t = extract_table(PAGE).unwrap();
        assert_eq!(t.headers, ["Símbolo", "Seguridad", "GICS Sector"]);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[0], ["AAPL", "Apple Inc.", "Information Technology"]);
        assert_eq!(t.rows[1], ["MMM", "3M", "Industrials"]);
    }

    #[test]
    fn skips_unmarked_tables() {
        let t = extract_table(PAGE).unwrap();
        assert!(t.rows.iter().all(|r| r[0] != "not the roster"));
    }

    #[test]
    fn missing_table_is_an_error() {
        let html = "<html><body><table class=\"infobox\"><tr><td>x</td></tr></table></body></html>";
        assert!(matches!(
            extract_table(html),
            Err(RosterError::TableNotFound)
        ));
    }

    #[test]
    fn mismatched_row_width_is_reported() {
        let html = r#"
            <table class="wikitable sortable">
              <tr><th>Símbolo</th><th>Seguridad</th></tr>
              <tr><td>AAPL</td><td>Apple Inc.</td></tr>
              <tr><td>only one cell</td></tr>
            </table>
        "#;
        match extract_table(html) {
            Err(RosterError::RowShapeMismatch {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 2);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected RowShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn rows_without_data_cells_are_skipped() {
        let html = r#"
            <table class="wikitable sortable">
              <tr><th>Símbolo</th><th>Seguridad</th></tr>
              <tr><th>a second</th><th>header row</th></tr>
              <tr><td>AAPL</td><td>Apple Inc.</td></tr>
            </table>
        "#;
        let t = extract_table(html).unwrap();
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0][0], "AAPL");
    }

    #[test]
    fn column_index_lookup() {
        let t = extract_table(PAGE).unwrap();
        assert_eq!(t.column_index("Símbolo"), Some(0));
        assert_eq!(t.column_index("Seguridad"), Some(1));
        assert_eq!(t.column_index("Dividend"), None);
    }
}
