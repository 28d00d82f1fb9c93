use colored::Colorize;

/// Truncated token prefix safe for logs and console output.
///
/// Never more than 5 characters; the full token is never surfaced anywhere.
pub fn token_prefix(token: &str) -> String {
    token.chars().take(5).collect()
}

/// Account display name with a fallback for accounts that have none.
pub fn display_name(name: Option<&str>) -> &str {
    name.unwrap_or("Unknown")
}

/// Print the startup banner with the local timestamp.
pub fn print_banner() {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    println!(
        "{}",
        format!("\n🚀 Hi-Pin Auto Check-In Bot\n📅 Started: {}\n", now).cyan()
    );
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    let mut row = String::new();
    for (i, col) in columns.iter().enumerate() {
        if i < widths.len() {
            row.push_str(&format!("{:<width$}  ", col, width = widths[i]));
        }
    }
    println!("{}", row.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_prefix_truncates() {
        assert_eq!(token_prefix("abcdefghij"), "abcde");
    }

    #[test]
    fn test_token_prefix_short_token() {
        assert_eq!(token_prefix("ab"), "ab");
        assert_eq!(token_prefix(""), "");
    }

    #[test]
    fn test_token_prefix_is_char_safe() {
        // Multi-byte characters must not be split
        assert_eq!(token_prefix("ありがとうございます"), "ありがとう");
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name(Some("alice")), "alice");
        assert_eq!(display_name(None), "Unknown");
    }
}
