//! Quantity rules for assignment rows.

use serde_json::Value;

use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;

/// Effect of a decrease on a row with the given quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecreaseStep {
    /// Quantity drops by one and the row stays.
    Decrement,
    /// The row held a single unit and is removed.
    Remove,
}

impl DecreaseStep {
    /// Decide what a decrease does to a row currently at `quantity`.
    pub fn for_quantity(quantity: i32) -> Self {
        if quantity > 1 {
            Self::Decrement
        } else {
            Self::Remove
        }
    }
}

/// Parse the `quantity` field of a set-quantity or bulk request.
///
/// Accepts non-negative integers. A JSON float with no fractional part
/// (`3.0`) is accepted as well; strings, negatives, fractions and values
/// beyond `i32::MAX` are rejected.
pub fn parse_quantity(value: &Value) -> AppResult<i32> {
    let invalid = || AppError::validation("Quantity must be a non-negative integer");

    let raw = match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                v
            } else if let Some(f) = n.as_f64() {
                if f < 0.0 || f.fract() != 0.0 || f > f64::from(i32::MAX) {
                    return Err(invalid());
                }
                f as u64
            } else {
                return Err(invalid());
            }
        }
        _ => return Err(invalid()),
    };

    i32::try_from(raw).map_err(|_| invalid())
}

/// Validate the quantity supplied when attaching a product.
pub fn validate_attach_quantity(quantity: i64) -> AppResult<i32> {
    if quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    i32::try_from(quantity).map_err(|_| AppError::validation("Quantity is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_decrease_step() {
        assert_eq!(DecreaseStep::for_quantity(3), DecreaseStep::Decrement);
        assert_eq!(DecreaseStep::for_quantity(2), DecreaseStep::Decrement);
        assert_eq!(DecreaseStep::for_quantity(1), DecreaseStep::Remove);
        assert_eq!(DecreaseStep::for_quantity(0), DecreaseStep::Remove);
    }

    #[test]
    fn test_parse_quantity_accepts_integers() {
        assert_eq!(parse_quantity(&json!(0)).unwrap(), 0);
        assert_eq!(parse_quantity(&json!(7)).unwrap(), 7);
        assert_eq!(parse_quantity(&json!(4.0)).unwrap(), 4);
    }

    #[test]
    fn test_parse_quantity_rejects_bad_input() {
        for bad in [
            json!(-1),
            json!(2.5),
            json!("3"),
            json!(null),
            json!(true),
            json!(u64::MAX),
        ] {
            let err = parse_quantity(&bad).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "input {bad}");
        }
    }

    #[test]
    fn test_attach_quantity() {
        assert_eq!(validate_attach_quantity(1).unwrap(), 1);
        assert!(validate_attach_quantity(0).is_err());
        assert!(validate_attach_quantity(-4).is_err());
        assert!(validate_attach_quantity(i64::from(i32::MAX) + 1).is_err());
    }
}
