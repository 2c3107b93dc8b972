//! Callback Invariant Guard
//!
//! A caller can ask for asynchronous (callback) delivery either through the
//! `callback` field of the request configuration or through an explicit
//! argument of a `*_callback` operation, never both. These checks are pure
//! and run before any URL is built.

use crate::error::DeepgramError;

/// Where a callback URL was supplied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackSource<'a> {
    Neither,
    Field(&'a str),
    Argument(&'a str),
    Both,
}

impl<'a> CallbackSource<'a> {
    pub fn classify(field: Option<&'a str>, argument: Option<&'a str>) -> Self {
        match (field, argument) {
            (None, None) => Self::Neither,
            (Some(value), None) => Self::Field(value),
            (None, Some(value)) => Self::Argument(value),
            (Some(_), Some(_)) => Self::Both,
        }
    }
}

/// Resolve the callback URL for a callback-style operation.
///
/// Exactly one of `field` and `argument` must carry a non-blank value.
pub fn resolve_callback(
    field: Option<&str>,
    argument: Option<&str>,
) -> Result<String, DeepgramError> {
    let value = match CallbackSource::classify(field, argument) {
        CallbackSource::Both => {
            return Err(DeepgramError::validation(
                "callback is set both in the request options and as an argument; set only one",
            ));
        }
        CallbackSource::Neither => {
            return Err(DeepgramError::validation(
                "callback operation requires a callback URL in the request options or as an argument",
            ));
        }
        CallbackSource::Field(value) | CallbackSource::Argument(value) => value,
    };
    if value.trim().is_empty() {
        return Err(DeepgramError::validation("callback URL must not be empty"));
    }
    Ok(value.to_string())
}

/// Synchronous operations return the result inline and must not carry a callback.
pub fn ensure_no_callback(field: Option<&str>) -> Result<(), DeepgramError> {
    if field.is_some() {
        return Err(DeepgramError::validation(
            "callback is set in the request options; use the callback variant of this operation",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_all_states() {
        assert_eq!(CallbackSource::classify(None, None), CallbackSource::Neither);
        assert_eq!(
            CallbackSource::classify(Some("a"), None),
            CallbackSource::Field("a")
        );
        assert_eq!(
            CallbackSource::classify(None, Some("b")),
            CallbackSource::Argument("b")
        );
        assert_eq!(
            CallbackSource::classify(Some("a"), Some("b")),
            CallbackSource::Both
        );
    }

    #[test]
    fn resolve_takes_whichever_source_is_set() {
        assert_eq!(
            resolve_callback(Some("https://cb.example/f"), None).unwrap(),
            "https://cb.example/f"
        );
        assert_eq!(
            resolve_callback(None, Some("https://cb.example/a")).unwrap(),
            "https://cb.example/a"
        );
    }

    #[test]
    fn resolve_rejects_both_neither_and_blank() {
        let both = resolve_callback(Some("x"), Some("y")).unwrap_err();
        assert!(matches!(both, DeepgramError::Validation(_)));

        let neither = resolve_callback(None, None).unwrap_err();
        assert!(matches!(neither, DeepgramError::Validation(_)));

        let blank = resolve_callback(Some("  "), None).unwrap_err();
        assert!(matches!(blank, DeepgramError::Validation(_)));
    }

    #[test]
    fn synchronous_operations_reject_callback_field() {
        assert!(ensure_no_callback(None).is_ok());
        assert!(matches!(
            ensure_no_callback(Some("https://cb.example")),
            Err(DeepgramError::Validation(_))
        ));
    }
}
