use std::collections::BTreeSet;

/// Outcome of a single validation run. Replaced wholesale on every run,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_invalid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_invalid: false,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_invalid: true,
            message: Some(message.into()),
        }
    }
}

/// Constraints for a free-text field. The validator itself stays generic;
/// each field's limits live in its schema.
#[derive(Debug, Clone, Copy)]
pub struct StringSchema {
    pub label: &'static str,
    pub required: bool,
    pub max_len: usize,
}

pub const fn queue_name_schema() -> StringSchema {
    StringSchema {
        label: "Name",
        required: true,
        max_len: 100,
    }
}

pub const fn queue_description_schema() -> StringSchema {
    StringSchema {
        label: "Description",
        required: false,
        max_len: 1000,
    }
}

/// Pure and total: never panics, same input always yields the same result.
pub fn validate_string(value: &str, schema: &StringSchema) -> ValidationResult {
    if schema.required && value.trim().is_empty() {
        return ValidationResult::invalid(format!("{} is required", schema.label));
    }
    if value.chars().count() > schema.max_len {
        return ValidationResult::invalid(format!(
            "{} must be at most {} characters",
            schema.label, schema.max_len
        ));
    }
    ValidationResult::valid()
}

/// Emptiness is the only failure condition for the category set.
pub fn validate_categories(categories: &BTreeSet<String>) -> ValidationResult {
    if categories.is_empty() {
        ValidationResult::invalid("Select at least one category")
    } else {
        ValidationResult::valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_field_rejects_blank_values() {
        let schema = queue_name_schema();
        assert!(validate_string("", &schema).is_invalid);
        assert!(validate_string("   ", &schema).is_invalid);
        assert!(!validate_string("Math Help", &schema).is_invalid);
    }

    #[test]
    fn optional_field_accepts_blank_values() {
        let schema = queue_description_schema();
        assert!(!validate_string("", &schema).is_invalid);
    }

    #[test]
    fn over_length_values_are_rejected_at_the_boundary() {
        let schema = queue_name_schema();
        let at_limit = "x".repeat(schema.max_len);
        let over_limit = "x".repeat(schema.max_len + 1);
        assert!(!validate_string(&at_limit, &schema).is_invalid);
        assert!(validate_string(&over_limit, &schema).is_invalid);
    }

    #[test]
    fn validation_is_deterministic_and_idempotent() {
        let schema = queue_name_schema();
        for value in ["", "ok", "   ", "über-queue"] {
            let first = validate_string(value, &schema);
            let second = validate_string(value, &schema);
            assert_eq!(first, second);
        }

        let categories: BTreeSet<String> = ["zoom".to_string()].into();
        assert_eq!(
            validate_categories(&categories),
            validate_categories(&categories)
        );
    }

    #[test]
    fn empty_category_set_is_the_only_failure() {
        assert!(validate_categories(&BTreeSet::new()).is_invalid);
        let one: BTreeSet<String> = ["inperson".to_string()].into();
        assert!(!validate_categories(&one).is_invalid);
    }
}
