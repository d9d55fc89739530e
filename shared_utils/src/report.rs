//! Report Module
//!
//! Size formatting shared by per-file messages and summary blocks.

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Percentage saved going from `input_size` to `output_size`.
/// Negative when the output grew; 0.0 for an empty input.
pub fn calculate_size_reduction(input_size: u64, output_size: u64) -> f64 {
    if input_size == 0 {
        return 0.0;
    }
    (1.0 - (output_size as f64 / input_size as f64)) * 100.0
}

pub fn format_size_change(input_size: u64, output_size: u64) -> String {
    let reduction_pct = calculate_size_reduction(input_size, output_size);

    if reduction_pct >= 0.0 {
        format!("{:.1}% smaller", reduction_pct)
    } else {
        format!("{:.1}% larger", -reduction_pct)
    }
}
