use super::extract::extract_title_and_body;
use crate::core::types::PageText;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// One reference dataset row. Only `url` is required; absent columns read as `None`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DatasetRow {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body_text: Option<String>,
}

/// Load the reference dataset. A missing file is `Ok(None)`, not an error.
pub fn load_dataset(path: &Path) -> Result<Option<Vec<DatasetRow>>> {
    if !path.exists() {
        info!("Reference dataset not found at {}", path.display());
        return Ok(None);
    }

    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;
    let rows = read_rows(file).with_context(|| format!("failed to read dataset {}", path.display()))?;
    info!("Loaded {} dataset rows from {}", rows.len(), path.display());
    Ok(Some(rows))
}

/// Parse CSV rows from any reader. Header names select columns; extra columns are ignored.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<DatasetRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if !headers.iter().any(|h| h.trim() == "url") {
        warn!("Dataset has no 'url' column; rows will carry no identifier");
    }

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed CSV record {}", index + 1))?;
        let field = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .and_then(|i| record.get(i))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        rows.push(DatasetRow {
            url: field("url"),
            html_content: field("html_content"),
            title: field("title"),
            body_text: field("body_text"),
        });
    }
    Ok(rows)
}

/// Map dataset rows to normalized page text. Rows with HTML go through the
/// extractor; the rest pass their `title`/`body_text` through verbatim.
pub fn parse_rows(rows: &[DatasetRow]) -> Vec<PageText> {
    rows.iter()
        .map(|row| match row.html_content.as_deref() {
            Some(html) if !html.trim().is_empty() => {
                let (title, body_text) = extract_title_and_body(html);
                PageText::new(row.url.clone(), title, body_text)
            }
            _ => PageText::new(
                row.url.clone(),
                row.title.clone().unwrap_or_default(),
                row.body_text.clone().unwrap_or_default(),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_optional_columns() {
        let csv = "url,title,body_text\nhttps://a.test,Alpha,Some body\nhttps://b.test,,\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title.as_deref(), Some("Alpha"));
        assert_eq!(rows[0].html_content, None);
        assert_eq!(rows[1].body_text, None);
    }

    #[test]
    fn html_rows_are_extracted_and_others_pass_through() {
        let rows = vec![
            DatasetRow {
                url: Some("https://a.test".into()),
                html_content: Some("<title>A</title><p>Hello   there.</p>".into()),
                title: Some("ignored".into()),
                body_text: Some("ignored".into()),
            },
            DatasetRow {
                url: Some("https://b.test".into()),
                html_content: None,
                title: Some("B".into()),
                body_text: Some("kept  verbatim".into()),
            },
            DatasetRow {
                url: None,
                ..Default::default()
            },
        ];
        let pages = parse_rows(&rows);
        assert_eq!(pages[0], PageText::new(Some("https://a.test".into()), "A", "Hello there."));
        assert_eq!(pages[1].body_text, "kept  verbatim");
        assert_eq!(pages[2], PageText::default());
    }

    #[test]
    fn html_content_with_commas_and_newlines_survives_quoting() {
        let csv = "url,html_content\nhttps://c.test,\"<p>One, two,\nthree.</p>\"\n";
        let pages = parse_rows(&read_rows(csv.as_bytes()).unwrap());
        assert_eq!(pages[0].body_text, "One, two, three.");
    }
}
