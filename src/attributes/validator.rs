use super::value::{AttributeValue, Attributes};
use crate::config::types::{AttributeConfig, InvalidAttributePolicy};
use crate::error::{ApmError, Result};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a single attribute was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("attribute key is empty")]
    EmptyKey,

    #[error("attribute key is {len} bytes, limit is {max}")]
    KeyTooLong { len: usize, max: usize },

    #[error("float attribute is not finite")]
    NonFiniteFloat,

    #[error("nested map attributes are not allowed")]
    NestedNotAllowed,

    #[error("nested map is deeper than {max} levels")]
    TooDeep { max: usize },
}

/// Rule set applied to every attribute an error exposes
pub trait AttributeValidator: Send + Sync {
    /// Check one attribute, returning the (possibly truncated) value to keep
    fn validate(&self, key: &str, value: &AttributeValue) -> std::result::Result<AttributeValue, AttributeError>;
}

/// Default attribute rules: bounded keys, truncated strings, finite floats,
/// and nested maps only when explicitly allowed, up to `max_nesting_depth`
/// levels.
#[derive(Debug, Clone)]
pub struct DefaultAttributeValidator {
    pub max_key_bytes: usize,
    pub max_value_bytes: usize,
    pub allow_nested: bool,
    pub max_nesting_depth: usize,
}

impl DefaultAttributeValidator {
    pub fn new() -> Self {
        Self::from_config(&AttributeConfig::default())
    }

    pub fn from_config(config: &AttributeConfig) -> Self {
        Self {
            max_key_bytes: config.max_key_bytes,
            max_value_bytes: config.max_value_bytes,
            allow_nested: config.allow_nested,
            max_nesting_depth: config.max_nesting_depth,
        }
    }

    fn check_key(&self, key: &str) -> std::result::Result<(), AttributeError> {
        if key.is_empty() {
            return Err(AttributeError::EmptyKey);
        }
        if key.len() > self.max_key_bytes {
            return Err(AttributeError::KeyTooLong {
                len: key.len(),
                max: self.max_key_bytes,
            });
        }
        Ok(())
    }

    /// `depth` is the number of maps enclosing `value`
    fn check_value(
        &self,
        value: &AttributeValue,
        depth: usize,
    ) -> std::result::Result<AttributeValue, AttributeError> {
        match value {
            AttributeValue::String(s) => Ok(AttributeValue::String(
                truncate_on_char_boundary(s, self.max_value_bytes).to_string(),
            )),
            AttributeValue::Float(f) if !f.is_finite() => Err(AttributeError::NonFiniteFloat),
            AttributeValue::Map(_) if !self.allow_nested => Err(AttributeError::NestedNotAllowed),
            AttributeValue::Map(_) if depth >= self.max_nesting_depth => Err(AttributeError::TooDeep {
                max: self.max_nesting_depth,
            }),
            AttributeValue::Map(inner) => {
                let mut checked = Attributes::new();
                for (k, v) in inner {
                    self.check_key(k)?;
                    checked.insert(k.clone(), self.check_value(v, depth + 1)?);
                }
                Ok(AttributeValue::Map(checked))
            }
            other => Ok(other.clone()),
        }
    }
}

impl Default for DefaultAttributeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeValidator for DefaultAttributeValidator {
    fn validate(&self, key: &str, value: &AttributeValue) -> std::result::Result<AttributeValue, AttributeError> {
        self.check_key(key)?;
        self.check_value(value, 0)
    }
}

/// Apply `validator` to a whole attribute map.
///
/// Keys are visited in sorted order and kept while their values fit in
/// `max_attributes`, where a nested map costs one per scalar it contains.
/// Attributes past the limit are dropped without being validated. With
/// [`InvalidAttributePolicy::Reject`] the first invalid attribute that would
/// otherwise be kept fails the whole map; with `Drop` it is logged and skipped.
pub fn validate_attributes(
    validator: &dyn AttributeValidator,
    attributes: &Attributes,
    max_attributes: usize,
    on_invalid: InvalidAttributePolicy,
) -> Result<Attributes> {
    let mut kept = Attributes::new();
    let mut used = 0;

    for (key, value) in attributes {
        if used + value.leaf_count() > max_attributes {
            debug!(key = %key, used, limit = max_attributes, "attribute limit reached, dropping");
            continue;
        }

        match validator.validate(key, value) {
            Ok(valid) => {
                let cost = valid.leaf_count();
                if used + cost > max_attributes {
                    debug!(key = %key, used, limit = max_attributes, "attribute limit reached, dropping");
                    continue;
                }
                used += cost;
                kept.insert(key.clone(), valid);
            }
            Err(err) => match on_invalid {
                InvalidAttributePolicy::Reject => {
                    return Err(ApmError::invalid_attribute(key.clone(), err.to_string()));
                }
                InvalidAttributePolicy::Drop => {
                    warn!(key = %key, kind = value.kind(), error = %err, "dropping invalid error attribute");
                }
            },
        }
    }

    Ok(kept)
}

fn truncate_on_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, AttributeValue)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_long_strings_are_truncated() {
        let validator = DefaultAttributeValidator::new();
        let long = "x".repeat(300);
        let value = validator.validate("k", &long.into()).unwrap();
        assert_eq!(value.as_str().map(str::len), Some(255));
    }

    #[test]
    fn test_truncation_respects_utf8() {
        // 'é' is two bytes; a 3-byte limit must not split the second one
        assert_eq!(truncate_on_char_boundary("éé", 3), "é");
        assert_eq!(truncate_on_char_boundary("abc", 10), "abc");
    }

    #[test]
    fn test_key_rules() {
        let validator = DefaultAttributeValidator::new();
        assert_eq!(
            validator.validate("", &1.into()),
            Err(AttributeError::EmptyKey)
        );
        let key = "k".repeat(256);
        assert_eq!(
            validator.validate(&key, &1.into()),
            Err(AttributeError::KeyTooLong { len: 256, max: 255 })
        );
    }

    #[test]
    fn test_non_finite_and_nested() {
        let validator = DefaultAttributeValidator::new();
        assert_eq!(
            validator.validate("f", &f64::INFINITY.into()),
            Err(AttributeError::NonFiniteFloat)
        );
        let nested = AttributeValue::Map(attrs(&[("inner", 1.into())]));
        assert_eq!(
            validator.validate("m", &nested),
            Err(AttributeError::NestedNotAllowed)
        );

        let permissive = DefaultAttributeValidator {
            allow_nested: true,
            ..DefaultAttributeValidator::new()
        };
        assert_eq!(permissive.validate("m", &nested), Ok(nested));
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let validator = DefaultAttributeValidator {
            allow_nested: true,
            max_nesting_depth: 2,
            ..DefaultAttributeValidator::new()
        };
        let two_levels = AttributeValue::Map(attrs(&[(
            "a",
            AttributeValue::Map(attrs(&[("b", 1.into())])),
        )]));
        assert_eq!(validator.validate("m", &two_levels), Ok(two_levels.clone()));

        let three_levels = AttributeValue::Map(attrs(&[("outer", two_levels)]));
        assert_eq!(
            validator.validate("m", &three_levels),
            Err(AttributeError::TooDeep { max: 2 })
        );
    }

    #[test]
    fn test_nested_keys_are_checked() {
        let validator = DefaultAttributeValidator {
            allow_nested: true,
            ..DefaultAttributeValidator::new()
        };
        let nested = AttributeValue::Map(attrs(&[("", 1.into())]));
        assert_eq!(validator.validate("m", &nested), Err(AttributeError::EmptyKey));
    }

    #[test]
    fn test_nested_values_count_toward_limit() {
        let validator = DefaultAttributeValidator {
            allow_nested: true,
            ..DefaultAttributeValidator::new()
        };
        let big: Attributes = (0..1000_i64).map(|i| (format!("k{i}"), AttributeValue::from(i))).collect();
        let small = AttributeValue::Map(attrs(&[("x", 1.into()), ("y", 2.into())]));
        let input = attrs(&[("big", AttributeValue::Map(big)), ("small", small.clone()), ("z", 3.into())]);

        let kept = validate_attributes(&validator, &input, 3, InvalidAttributePolicy::Drop).unwrap();
        assert_eq!(kept, attrs(&[("small", small), ("z", 3.into())]));
        assert_eq!(kept.values().map(AttributeValue::leaf_count).sum::<usize>(), 3);
    }

    #[test]
    fn test_reject_ignores_attributes_past_limit() {
        let validator = DefaultAttributeValidator::new();
        let input = attrs(&[("a", 1.into()), ("b", f64::NAN.into())]);

        let kept = validate_attributes(&validator, &input, 1, InvalidAttributePolicy::Reject).unwrap();
        assert_eq!(kept, attrs(&[("a", 1.into())]));
    }

    #[test]
    fn test_drop_policy_skips_invalid() {
        let validator = DefaultAttributeValidator::new();
        let input = attrs(&[("bad", f64::NAN.into()), ("good", "zap".into())]);

        let kept = validate_attributes(&validator, &input, 64, InvalidAttributePolicy::Drop).unwrap();
        assert_eq!(kept, attrs(&[("good", "zap".into())]));
    }

    #[test]
    fn test_reject_policy_fails_whole_map() {
        let validator = DefaultAttributeValidator::new();
        let input = attrs(&[("bad", f64::NAN.into()), ("good", "zap".into())]);

        let err = validate_attributes(&validator, &input, 64, InvalidAttributePolicy::Reject).unwrap_err();
        assert!(matches!(err, ApmError::InvalidAttribute { ref key, .. } if key == "bad"));
    }

    #[test]
    fn test_attribute_limit_keeps_first_sorted_keys() {
        let validator = DefaultAttributeValidator::new();
        let input = attrs(&[("c", 3.into()), ("a", 1.into()), ("b", 2.into())]);

        let kept = validate_attributes(&validator, &input, 2, InvalidAttributePolicy::Drop).unwrap();
        assert_eq!(kept, attrs(&[("a", 1.into()), ("b", 2.into())]));
    }
}
