use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::shared::types::FieldErrors;

lazy_static! {
    /// Regex for person names
    /// Letters (including accented), spaces and hyphens, starting with a letter
    /// - Valid: "Juan", "Dela Cruz", "Santo-Niño"
    /// - Invalid: "Juan3", "Ma. Lourdes", "O'Neil", ""
    pub static ref NAME_REGEX: Regex = Regex::new(r"^[\p{L}][\p{L} \-]*$").unwrap();

    /// Regex for contact numbers
    /// Digits, plus sign and spaces only
    /// - Valid: "09171234567", "+63 917 123 4567"
    /// - Invalid: "0917-123-4567", "call me"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9+ ]+$").unwrap();
}

/// Rejects values that are empty once surrounding whitespace is trimmed
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Flatten `validator` errors into a field-keyed map.
///
/// Nested structs become dotted paths (`farmer.location.barangay_id`) and list
/// entries are indexed (`items[2].name`). Only the first message per field is kept.
pub fn flatten_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect(errors, "", &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(first) = list.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| first.code.to_string());
                    out.entry(path).or_insert(message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

/// Prefix every key of `errors` with `section.`
pub fn nest_errors(section: &str, errors: FieldErrors) -> FieldErrors {
    errors
        .into_iter()
        .map(|(field, message)| (format!("{}.{}", section, field), message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Inner {
        #[validate(range(min = 1, message = "Pick a barangay"))]
        barangay_id: i64,
    }

    #[derive(Validate)]
    struct Outer {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(nested)]
        location: Inner,
    }

    #[test]
    fn test_name_regex() {
        assert!(NAME_REGEX.is_match("Juan"));
        assert!(NAME_REGEX.is_match("Dela Cruz"));
        assert!(NAME_REGEX.is_match("Santo-Niño"));
        assert!(!NAME_REGEX.is_match("Ma. Lourdes")); // period
        assert!(!NAME_REGEX.is_match("O'Neil")); // apostrophe
        assert!(!NAME_REGEX.is_match("Juan3")); // digit
        assert!(!NAME_REGEX.is_match("-Juan")); // starts with hyphen
        assert!(!NAME_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Decis").is_ok());
        assert!(not_blank(" x ").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("\t\n").is_err());
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("09171234567"));
        assert!(PHONE_REGEX.is_match("+63 917 123 4567"));
        assert!(!PHONE_REGEX.is_match("0917-123-4567"));
        assert!(!PHONE_REGEX.is_match("call me"));
    }

    #[test]
    fn test_flatten_nested_errors() {
        let value = Outer {
            name: String::new(),
            location: Inner { barangay_id: 0 },
        };
        let errors = value.validate().unwrap_err();
        let flat = flatten_errors(&errors);

        assert_eq!(flat.get("name").map(String::as_str), Some("Name is required"));
        assert_eq!(
            flat.get("location.barangay_id").map(String::as_str),
            Some("Pick a barangay")
        );
    }

    #[test]
    fn test_nest_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("contact_number".to_string(), "required".to_string());
        let nested = nest_errors("farmer", errors);
        assert!(nested.contains_key("farmer.contact_number"));
    }
}
