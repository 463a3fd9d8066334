use regex::Regex;
use std::sync::LazyLock;

pub const INVALID_EMAIL: &str = "Invalid email format";
pub const INVALID_PHONE: &str = "Phone number must be 10 digits";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone pattern"));

/// Empty when `email` looks like `local@domain.tld`, the error message otherwise
pub fn validate_email(email: &str) -> &'static str {
    if EMAIL.is_match(email) { "" } else { INVALID_EMAIL }
}

/// Empty when `phone` is exactly ten ASCII digits, the error message otherwise
pub fn validate_phone(phone: &str) -> &'static str {
    if PHONE.is_match(phone) { "" } else { INVALID_PHONE }
}
