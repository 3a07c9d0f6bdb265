//! Structural checks for contact-form input.
//!
//! Every rule is evaluated; violations are collected rather than
//! short-circuited. Each field contributes at most one message, and the
//! messages appear in field order: name, email, message.

use serde::Serialize;

use crate::submission::NewSubmission;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const MESSAGE_MIN: usize = 10;
pub const MESSAGE_MAX: usize = 1000;

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
  pub is_valid: bool,
  pub errors:   Vec<String>,
}

/// Check `input` against the name, email and message rules.
///
/// Lengths are counted in Unicode scalar values after trimming.
pub fn validate(input: &NewSubmission) -> ValidationResult {
  let errors: Vec<String> = [
    check_name(&input.name),
    check_email(&input.email),
    check_message(&input.message),
  ]
  .into_iter()
  .flatten()
  .map(str::to_owned)
  .collect();

  ValidationResult { is_valid: errors.is_empty(), errors }
}

fn check_name(name: &str) -> Option<&'static str> {
  let len = name.trim().chars().count();
  if len == 0 {
    Some("Name is required")
  } else if len < NAME_MIN {
    Some("Name must be at least 2 characters long")
  } else if len > NAME_MAX {
    Some("Name must be less than 100 characters")
  } else {
    None
  }
}

fn check_email(email: &str) -> Option<&'static str> {
  if email.trim().is_empty() {
    Some("Email is required")
  } else if !is_valid_email(email) {
    Some("Please enter a valid email address")
  } else {
    None
  }
}

fn check_message(message: &str) -> Option<&'static str> {
  let len = message.trim().chars().count();
  if len == 0 {
    Some("Message is required")
  } else if len < MESSAGE_MIN {
    Some("Message must be at least 10 characters long")
  } else if len > MESSAGE_MAX {
    Some("Message must be less than 1000 characters")
  } else {
    None
  }
}

/// Basic `local@domain.tld` shape check.
///
/// No whitespace anywhere, exactly one `@`, a non-empty local part, and a
/// domain with at least one `.` that has text on both sides. The raw value
/// is checked, so surrounding whitespace is rejected.
pub fn is_valid_email(email: &str) -> bool {
  if email.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = email.split_once('@') else {
    return false;
  };
  if local.is_empty() || domain.contains('@') {
    return false;
  }
  domain
    .char_indices()
    .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn input(name: &str, email: &str, message: &str) -> NewSubmission {
    NewSubmission::new(name, email, message)
  }

  #[test]
  fn valid_input_has_no_errors() {
    let result = validate(&input("Jo", "jo@example.com", "Hello there, this works."));
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
  }

  #[test]
  fn boundaries_are_inclusive() {
    let name = "n".repeat(NAME_MAX);
    let message = "m".repeat(MESSAGE_MAX);
    assert!(validate(&input(&name, "a@b.co", &message)).is_valid);

    let message = "m".repeat(MESSAGE_MIN);
    assert!(validate(&input("ab", "a@b.co", &message)).is_valid);
  }

  #[test]
  fn lengths_are_measured_after_trimming() {
    let result = validate(&input("  J  ", "jo@example.com", "   short    "));
    assert_eq!(result.errors, vec![
      "Name must be at least 2 characters long",
      "Message must be at least 10 characters long",
    ]);
  }

  #[test]
  fn lengths_count_unicode_scalars() {
    // One scalar, even though it needs two UTF-16 code units.
    let result = validate(&input("😀", "jo@example.com", "long enough message"));
    assert_eq!(result.errors, vec!["Name must be at least 2 characters long"]);

    assert!(validate(&input("😀😀", "jo@example.com", "long enough message")).is_valid);
    let message = "😀".repeat(MESSAGE_MIN);
    assert!(validate(&input("Jo", "jo@example.com", &message)).is_valid);
  }

  #[test]
  fn lengths_count_characters_not_bytes() {
    // 100 two-byte characters is still within the name limit.
    let name = "é".repeat(NAME_MAX);
    assert!(validate(&input(&name, "a@b.co", "long enough message")).is_valid);
  }

  #[test]
  fn single_violation_yields_single_message() {
    let over = "n".repeat(NAME_MAX + 1);
    let result = validate(&input(&over, "jo@example.com", "long enough message"));
    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["Name must be less than 100 characters"]);

    let result = validate(&input("Jo", "jo@example.com", &"m".repeat(MESSAGE_MAX + 1)));
    assert_eq!(result.errors, vec!["Message must be less than 1000 characters"]);
  }

  #[test]
  fn all_violations_are_reported_in_field_order() {
    let result = validate(&input("J", "bad-email", "short"));
    assert!(!result.is_valid);
    assert_eq!(result.errors, vec![
      "Name must be at least 2 characters long",
      "Please enter a valid email address",
      "Message must be at least 10 characters long",
    ]);
  }

  #[test]
  fn empty_fields_are_required() {
    let result = validate(&input("   ", "", "\n"));
    assert_eq!(result.errors, vec![
      "Name is required",
      "Email is required",
      "Message is required",
    ]);
  }

  #[test]
  fn email_shapes() {
    for ok in ["jo@example.com", "a.b@c.d.e", "x+tag@sub.example.org"] {
      assert!(is_valid_email(ok), "{ok} should be valid");
    }
    for bad in [
      "bad-email",
      "@example.com",
      "jo@example",
      "jo@.com",
      "jo@example.",
      "jo@@example.com",
      "jo@exa@mple.com",
      "jo @example.com",
      " jo@example.com",
    ] {
      assert!(!is_valid_email(bad), "{bad} should be invalid");
    }
  }
}
