// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for attack simulation.

use form_guard::ContactForm;

/// Generate a pool of client identifiers for testing.
pub fn generate_identifiers(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("session-{:04}", i)).collect()
}

/// A form that passes every validation rule.
pub fn valid_form(index: usize) -> ContactForm {
    ContactForm {
        name: format!("Visitor {}", index),
        email: format!("visitor{}@example.org", index),
        message: format!("Hello, we would like to talk about our release pipeline ({}).", index),
        phone: Some("+44 (20) 7946-0000".to_string()),
        company: None,
    }
}

/// A form that fails every validation rule.
pub fn junk_form() -> ContactForm {
    ContactForm {
        name: "x".to_string(),
        email: "not-an-email".to_string(),
        message: "buy now".to_string(),
        ..Default::default()
    }
}

/// Values a naive form filler puts into every field.
pub fn generate_bot_fills() -> Vec<&'static str> {
    vec![
        "https://cheap-pills.example.com",
        "bot@spam.example.com",
        "1",
        " ",
        "<a href='x'>win</a>",
    ]
}

/// Hostile strings for sanitizer properties.
pub fn generate_hostile_strings() -> Vec<String> {
    let controls: String = (0u8..=0x1f).map(char::from).chain(['\u{7f}']).collect();
    vec![
        String::new(),
        "   ".to_string(),
        controls.clone(),
        format!("{controls}payload{controls}"),
        "<script>alert(document.cookie)</script>".to_string(),
        "<img src=x onerror=alert(1)>".to_string(),
        "'; DROP TABLE users; --".to_string(),
        "\u{202e}reversed\u{200b}zero-width".to_string(),
        "é".repeat(2000),
        "A".repeat(10_000),
        "\r\n".repeat(600),
        "  MiXeD.Case+Tag@Example.COM  ".to_string(),
        "émoji 🎉 user@dömain.test".to_string(),
    ]
}

/// Email-looking inputs that must not pass the shape rule.
pub fn generate_malformed_emails() -> Vec<&'static str> {
    vec![
        "",
        "   ",
        "invalid",
        "user@",
        "@example.com",
        "user@host",
        "us er@example.com",
        "user@@example.com",
    ]
}

/// Deterministic pseudo-random choice based on index and ratio.
pub fn pick(ratio: f64, index: usize) -> bool {
    if ratio >= 1.0 {
        true
    } else if ratio <= 0.0 {
        false
    } else {
        (index as f64 * 0.618033988749895) % 1.0 < ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_identifiers() {
        let ids = generate_identifiers(256);
        assert_eq!(ids.len(), 256);
        // All should be unique
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn test_pick_extremes() {
        assert!(pick(1.0, 7));
        assert!(!pick(0.0, 7));
    }
}
