pub mod formatter;

pub use formatter::{
    format_article_table, format_count, format_number, format_published_date, format_repo_table,
    should_use_colors, truncate_label,
};
