pub mod analyze;
pub mod duplicates;
pub mod report;

pub use analyze::{analyze_page, analyze_url, load_reference_pages};
pub use duplicates::scan_dataset;
pub use report::{export_json, render_text, write_export};
