pub mod formatter;

pub use formatter::{
    format_items, format_json, format_missing, format_report, format_score, format_tsv,
    should_use_colors, truncate_text,
};
