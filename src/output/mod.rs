pub mod formatter;

pub use formatter::{
    format_achievements, format_age, format_performance_detail, format_performance_table,
    format_points, format_sheet, format_unlocked, should_use_colors,
};
