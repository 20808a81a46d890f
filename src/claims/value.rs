use std::time::SystemTime;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// A value that can be stored as a claim or as an extra header field.
///
/// Every supported input is converted into its JSON form up front. Time
/// points ([`SystemTime`] and [`chrono::DateTime`]) become integer seconds
/// since the Unix epoch, so `exp`, `nbf` and `iat` can be set straight from
/// a clock reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimValue(Value);

impl ClaimValue {
    /// Creates a claim value from a number of seconds since the Unix epoch.
    pub fn timestamp(secs: i64) -> Self {
        Self(Value::from(secs))
    }

    /// Returns the JSON form of this value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Borrows the JSON form of this value.
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<SystemTime> for ClaimValue {
    fn from(t: SystemTime) -> Self {
        Self::from(DateTime::<Utc>::from(t))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for ClaimValue {
    fn from(t: DateTime<Tz>) -> Self {
        Self::timestamp(t.timestamp())
    }
}

impl From<Value> for ClaimValue {
    fn from(v: Value) -> Self {
        Self(v)
    }
}

impl From<&Value> for ClaimValue {
    fn from(v: &Value) -> Self {
        Self(v.clone())
    }
}

impl From<Map<String, Value>> for ClaimValue {
    fn from(v: Map<String, Value>) -> Self {
        Self(Value::Object(v))
    }
}

impl From<ClaimValue> for Value {
    fn from(v: ClaimValue) -> Self {
        v.0
    }
}

macro_rules! claim_value_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for ClaimValue {
                fn from(v: $t) -> Self {
                    Self(Value::from(v))
                }
            }
        )*
    };
}

claim_value_from!(
    &str,
    String,
    bool,
    i32,
    i64,
    u32,
    u64,
    f64,
    Vec<String>,
    Vec<&str>,
    Vec<Value>,
);

impl From<&String> for ClaimValue {
    fn from(v: &String) -> Self {
        Self(Value::from(v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;

    #[test]
    fn time_points_become_seconds() {
        let t = UNIX_EPOCH + Duration::from_millis(1_513_862_371_999);
        assert_eq!(ClaimValue::from(t).into_value(), Value::from(1_513_862_371));

        let dt = Utc.timestamp_opt(1_513_863_371, 0).unwrap();
        assert_eq!(ClaimValue::from(dt).into_value(), Value::from(1_513_863_371));

        let before_epoch = UNIX_EPOCH - Duration::from_secs(10);
        assert_eq!(ClaimValue::from(before_epoch).into_value(), Value::from(-10));
    }

    #[test]
    fn plain_values() {
        assert_eq!(ClaimValue::from("x").into_value(), Value::from("x"));
        assert_eq!(ClaimValue::from(true).into_value(), Value::Bool(true));
        assert_eq!(
            ClaimValue::from(vec!["a", "b"]).into_value(),
            serde_json::json!(["a", "b"])
        );
    }
}
