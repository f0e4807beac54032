//! Input validation for forms submitted to the backend
//!
//! Validation runs before any network call. A failed validation never
//! reaches the server; callers surface the first message inline.
//!
//! # Example
//!
//! ```rust
//! use masakin_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("email", "cook@example.com")
//!     .required("password", "")
//!     .validate();
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.errors()[0].field, "password");
//! ```

use serde::{Deserialize, Serialize};

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    fn fail(&mut self, field: &str, code: &str, message: String) {
        self.result.errors.push(ValidationError {
            field: field.to_string(),
            message,
            code: code.to_string(),
        });
    }

    /// Validate that a field is not blank
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.fail(field, "REQUIRED", "Field is required".to_string());
        }
        self
    }

    /// Validate minimum length in characters
    pub fn min_length(mut self, field: &str, value: &str, min: usize) -> Self {
        let len = value.chars().count();
        if len < min {
            self.fail(
                field,
                "MIN_LENGTH",
                format!("Must be at least {} characters", min),
            );
        }
        self
    }

    /// Validate that a value parses as a positive whole number
    pub fn positive_integer(mut self, field: &str, value: &str) -> Self {
        match value.trim().parse::<u32>() {
            Ok(n) if n > 0 => {}
            _ => self.fail(
                field,
                "POSITIVE_INTEGER",
                "Must be a positive whole number".to_string(),
            ),
        }
        self
    }

    /// Validate that at least one item is non-blank
    pub fn non_empty_list(mut self, field: &str, values: &[String]) -> Self {
        if !values.iter().any(|v| !v.trim().is_empty()) {
            self.fail(field, "NON_EMPTY_LIST", "Add at least one item".to_string());
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validation() {
        let result = Validator::new().required("name", "   ").validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "REQUIRED");
    }

    #[test]
    fn test_min_length_counts_chars() {
        let result = Validator::new().min_length("password", "ab", 6).validate();
        assert_eq!(result.errors()[0].code, "MIN_LENGTH");

        let result = Validator::new().min_length("password", "ñandú!", 6).validate();
        assert!(result.is_valid());
    }

    #[test]
    fn test_positive_integer() {
        assert!(Validator::new().positive_integer("t", "25").validate().is_valid());
        assert!(!Validator::new().positive_integer("t", "0").validate().is_valid());
        assert!(!Validator::new().positive_integer("t", "abc").validate().is_valid());
        assert!(Validator::new().positive_integer("t", " 45 ").validate().is_valid());
    }

    #[test]
    fn test_non_empty_list() {
        let blank = vec![String::new(), "  ".to_string()];
        assert!(!Validator::new().non_empty_list("steps", &blank).validate().is_valid());

        let filled = vec![String::new(), "Boil water".to_string()];
        assert!(Validator::new().non_empty_list("steps", &filled).validate().is_valid());
    }

    #[test]
    fn test_errors_follow_declaration_order() {
        let result = Validator::new()
            .required("title", "Soto")
            .positive_integer("cookingTime", "soon")
            .required("category", "")
            .validate();
        assert_eq!(result.errors().len(), 2);
        assert_eq!(result.errors()[0].field, "cookingTime");
    }
}
