use serde::{Deserialize, Deserializer, de::Error};
use serde_with::DeserializeAs;

/// Reads a JSON float into an integer field when it has no fractional part.
///
/// Used after the plain and string forms inside `PickFirst`, so `10`, `"10"`
/// and `10.0` all land as `10` while `1.5` is still rejected.
pub struct WholeNumber;

impl<'de> DeserializeAs<'de, i32> for WholeNumber {
    fn deserialize_as<D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;

        if value.fract() != 0.0 || !value.is_finite() {
            return Err(D::Error::custom(format!(
                "expected a whole number, got {}",
                value
            )));
        }
        if value < i32::MIN as f64 || value > i32::MAX as f64 {
            return Err(D::Error::custom(format!("{} is out of range for i32", value)));
        }

        Ok(value as i32)
    }
}
