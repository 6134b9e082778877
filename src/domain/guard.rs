//! Precondition checks run at the start of every public engine operation.

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::value::Value;

/// A field name is usable when it is non-empty.
pub fn is_usable_name(name: &str) -> bool {
    !name.is_empty()
}

/// An identifier is usable unless it is `Null` or the empty string.
///
/// Numeric zero is a valid identifier.
pub fn is_usable_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Str(s) => !s.is_empty(),
        _ => true,
    }
}

pub fn require_name(arg: &str, name: &str) -> DomainResult<()> {
    if is_usable_name(name) {
        Ok(())
    } else {
        Err(DomainError::invalid_argument(arg, "field name is empty"))
    }
}

pub fn require_value(arg: &str, value: &Value) -> DomainResult<()> {
    if is_usable_value(value) {
        Ok(())
    } else {
        Err(DomainError::invalid_argument(
            arg,
            format!("`{}` is not a usable identifier", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, false)]
    #[case(Value::from(""), false)]
    #[case(Value::from(0), true)]
    #[case(Value::from(false), true)]
    #[case(Value::from("a"), true)]
    fn test_is_usable_value(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_usable_value(&value), expected);
    }

    #[test]
    fn test_require_name_rejects_empty() {
        let err = require_name("checked", "").unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument { ref name, .. } if name == "checked"));
        assert!(require_name("checked", "checked").is_ok());
    }
}
