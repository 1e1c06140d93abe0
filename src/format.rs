/// Human-readable byte counts: B under 1 KB, then two-decimal KB/MB.
pub fn format_size(num: u64) -> String {
    if num < 1024 {
        format!("{num} B")
    } else if num < 1024 * 1024 {
        format!("{:.2} KB", num as f64 / 1024.0)
    } else {
        format!("{:.2} MB", num as f64 / 1024.0 / 1024.0)
    }
}
