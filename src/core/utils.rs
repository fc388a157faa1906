//! Text formatting helpers shared by handlers and formatters

/// Escapes `&`, `<` and `>` for Telegram HTML parse mode.
///
/// # Example
///
/// ```
/// use freelancetm::core::utils::escape_html;
///
/// assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Cuts `text` to `max_length` characters and appends `...` when shortened.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() > max_length {
        let cut: String = text.chars().take(max_length).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Formats an amount with at most two decimals and no trailing zeros.
///
/// # Example
///
/// ```
/// use freelancetm::core::utils::format_price;
///
/// assert_eq!(format_price(1500.0), "1500");
/// assert_eq!(format_price(99.5), "99.5");
/// assert_eq!(format_price(10.256), "10.26");
/// ```
pub fn format_price(amount: f64) -> String {
    let formatted = format!("{:.2}", amount);
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}
