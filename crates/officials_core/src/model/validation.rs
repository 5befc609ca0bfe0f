//! Shared required-field validation.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raised before any write when required input fields are blank or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFieldsError {
    fields: Vec<&'static str>,
}

impl MissingFieldsError {
    pub fn new(fields: Vec<&'static str>) -> Self {
        Self { fields }
    }

    /// Missing field names in declaration order.
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }
}

impl Display for MissingFieldsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing required fields: {}", self.fields.join(", "))
    }
}

impl Error for MissingFieldsError {}

/// Records `field` as missing when `value` is blank after trim.
pub(crate) fn require_text(missing: &mut Vec<&'static str>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        missing.push(field);
    }
}

/// Converts a collected list into a validation result.
pub(crate) fn finish(missing: Vec<&'static str>) -> Result<(), MissingFieldsError> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingFieldsError::new(missing))
    }
}
