//! Naming helpers
//!
//! Display names on a diagram are free text ("User Profile", "OrderLine",
//! "HTTP-Request"). Database identifiers and class names are derived from
//! them here so every part of the compiler agrees on the same spelling.

use heck::{ToPascalCase, ToSnakeCase};

/// Convert a display name to a lower snake_case database identifier.
///
/// Words are split on case changes and punctuation, lowercased and joined
/// with underscores. The conversion is idempotent and maps empty input to
/// empty output.
///
/// - "UserProfile" → "user_profile"
/// - "HTTP Request" → "http_request"
/// - "order-line" → "order_line"
pub fn sanitize(name: &str) -> String {
    name.to_snake_case().replace(' ', "")
}

/// Convert a display name to a PascalCase class name ("user profile" →
/// "UserProfile").
pub fn class_name(name: &str) -> String {
    name.to_pascal_case()
}

/// Default foreign-key column for a referenced table ("BlogPost" →
/// "blog_post_id").
pub fn foreign_key_column(referenced_table: &str) -> String {
    format!("{}_id", sanitize(referenced_table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("UserProfile"), "user_profile");
        assert_eq!(sanitize("User Profile"), "user_profile");
        assert_eq!(sanitize("HTTPRequest"), "http_request");
        assert_eq!(sanitize("order-line"), "order_line");
        assert_eq!(sanitize("  Customer  "), "customer");
        assert_eq!(sanitize("Order"), "order");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let samples = [
            "UserProfile",
            "HTTP Request",
            "already_snake",
            "Mixed-Case Name_here",
            "Table2Items",
            "x",
            "",
            "  spaced   out  ",
            "ÄpfelBaum",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_class_name() {
        assert_eq!(class_name("user_profile"), "UserProfile");
        assert_eq!(class_name("order status"), "OrderStatus");
        assert_eq!(class_name("Status"), "Status");
    }

    #[test]
    fn test_foreign_key_column() {
        assert_eq!(foreign_key_column("BlogPost"), "blog_post_id");
        assert_eq!(foreign_key_column("Customer"), "customer_id");
    }
}
