//! Structural request validation.
//!
//! Create/update bodies are typed DTOs that implement [`Validate`]. A
//! failed check responds 400 with field-level detail instead of a
//! generic message, so the client and server can disagree on format
//! rules without leaving the caller guessing.

use rust_decimal::Decimal;
use serde::Serialize;

use tazabag_core::Email;

/// One failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Collects field errors during validation of a request body.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-empty (after trim) string field.
    pub fn require(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors
                .push(FieldError::new(field, format!("{field} is required")));
        }
        self
    }

    /// Require a string of at least `min` characters after trimming.
    pub fn min_len(&mut self, field: &'static str, value: &str, min: usize) -> &mut Self {
        if value.trim().len() < min {
            self.errors.push(FieldError::new(
                field,
                format!("{field} must be at least {min} characters"),
            ));
        }
        self
    }

    /// Require a structurally valid email address.
    pub fn email(&mut self, field: &'static str, value: &str) -> &mut Self {
        if Email::parse(value.trim()).is_err() {
            self.errors
                .push(FieldError::new(field, "Valid email is required"));
        }
        self
    }

    /// Require a strictly positive decimal amount.
    pub fn positive(&mut self, field: &'static str, value: Decimal) -> &mut Self {
        if value <= Decimal::ZERO {
            self.errors
                .push(FieldError::new(field, format!("{field} must be positive")));
        }
        self
    }

    /// Require a strictly positive integer.
    pub fn positive_int(&mut self, field: &'static str, value: i32) -> &mut Self {
        if value <= 0 {
            self.errors
                .push(FieldError::new(field, format!("{field} must be positive")));
        }
        self
    }

    /// Finish validation, returning all collected field errors.
    ///
    /// # Errors
    ///
    /// Returns the accumulated [`FieldError`]s if any check failed.
    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// A request body that can be structurally validated.
pub trait Validate {
    /// Check the body's fields.
    ///
    /// # Errors
    ///
    /// Returns every failed field check, not just the first.
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        let mut v = Validator::new();
        v.require("name", "  ");
        let errors = v.finish().expect_err("blank field");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut v = Validator::new();
        v.require("firstName", "")
            .email("email", "nope")
            .positive("price", Decimal::ZERO);
        let errors = v.finish().expect_err("three failures");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_min_len() {
        let mut v = Validator::new();
        v.min_len("phone", "0301", 11);
        assert!(v.finish().is_err());

        let mut v = Validator::new();
        v.min_len("phone", "03001234567", 11);
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_valid_body_passes() {
        let mut v = Validator::new();
        v.require("name", "Anwar Ratol Mangoes")
            .email("email", "khan@tazabag.pk")
            .positive("price", Decimal::new(15000, 2))
            .positive_int("itemsLimit", 5);
        assert!(v.finish().is_ok());
    }
}
