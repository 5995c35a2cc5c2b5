pub mod dataset;
pub mod extract;
pub mod fetch;

pub use dataset::{load_dataset, parse_rows, DatasetRow};
pub use extract::{clean_whitespace, extract_title_and_body};
pub use fetch::{validate_url, HttpFetcher, PageFetcher};
