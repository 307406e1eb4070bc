pub fn format_millis(value: f64) -> String {
    let trimmed_zeros = format!("{:.3}", value).trim_end_matches('0').to_string();

    if trimmed_zeros.ends_with('.') {
        trimmed_zeros + "0"
    } else {
        trimmed_zeros
    }
}
