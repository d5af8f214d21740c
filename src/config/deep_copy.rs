//! Deep copy through a serde round trip.
//!
//! The copy shares nothing with the source. It fails when a value cannot
//! survive serialization, e.g. a non-finite float becomes `null` and cannot
//! be read back.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("deep copy of {type_name} failed: {source}")]
pub struct CopyError {
    pub type_name: &'static str,
    #[source]
    pub source: serde_json::Error,
}

pub fn deep_copy<T: Serialize + DeserializeOwned>(value: &T) -> Result<T, CopyError> {
    let wrap = |source| CopyError {
        type_name: std::any::type_name::<T>(),
        source,
    };
    let tree = serde_json::to_value(value).map_err(wrap)?;
    serde_json::from_value(tree).map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Captcha;

    #[test]
    fn test_copy_is_independent() {
        let mut original = Captcha::default();
        original.with_type("digit").with_key_len(4);

        let mut copy = deep_copy(&original).unwrap();
        copy.with_key_len(6);

        assert_eq!(original.key_len, 4);
        assert_eq!(copy.key_len, 6);
        assert_eq!(copy.kind, "digit");
    }

    #[test]
    fn test_non_finite_float_fails() {
        let mut captcha = Captcha::default();
        captcha.with_max_skew(f64::NAN);

        let err = deep_copy(&captcha).unwrap_err();
        assert!(err.type_name.ends_with("Captcha"));
    }
}
