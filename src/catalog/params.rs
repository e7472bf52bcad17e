//! Parameter vocabulary shared by catalog definitions and node instances

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Largest float that still identifies an exact integer (2^53)
const MAX_INTEGRAL: f64 = 9_007_199_254_740_992.0;

/// A single parameter value carried by a node instance
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numeric value (integers and floats share one representation)
    Number(f64),
    /// Text value, inserted into templates without added quoting
    String(String),
    /// Boolean value
    Boolean(bool),
}

impl ParamValue {
    /// Render this value as a Python literal fragment
    ///
    /// Integral numbers print without a trailing `.0` and booleans print
    /// capitalized, so substituted templates stay valid Python.
    pub fn as_python(&self) -> String {
        match self {
            ParamValue::Number(n) if is_integral(*n) => format!("{}", *n as i64),
            ParamValue::Number(n) => format!("{}", n),
            ParamValue::String(s) => s.clone(),
            ParamValue::Boolean(true) => "True".to_string(),
            ParamValue::Boolean(false) => "False".to_string(),
        }
    }

    /// Get the numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the text value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the boolean value, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_INTEGRAL
}

// Integral numbers serialize as JSON integers so persisted parameter maps and
// the generated configuration read `"padding": 1` rather than `"padding": 1.0`.
impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            ParamValue::Number(n) => serializer.serialize_f64(*n),
            ParamValue::String(s) => serializer.serialize_str(s),
            ParamValue::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Number(n as f64)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Number(n as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Boolean(b)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

/// Schema for a declared parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    /// Numeric parameter with optional editor constraints
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    /// Free-form text parameter
    String,
    /// Boolean parameter
    Boolean,
    /// Text parameter restricted to a fixed option list
    Select { options: &'static [&'static str] },
}

/// A parameter declared by a node type, with its default value
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ParamKind,
    pub default: ParamValue,
}

impl ParamSpec {
    /// Declare a numeric parameter
    pub fn number(name: &'static str, label: &'static str, default: f64) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Number {
                min: None,
                max: None,
                step: None,
            },
            default: ParamValue::Number(default),
        }
    }

    /// Declare a text parameter
    pub fn string(name: &'static str, label: &'static str, default: &str) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::String,
            default: ParamValue::String(default.to_string()),
        }
    }

    /// Declare a boolean parameter
    pub fn boolean(name: &'static str, label: &'static str, default: bool) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Boolean,
            default: ParamValue::Boolean(default),
        }
    }

    /// Declare a select parameter over a fixed option list
    pub fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        default: &str,
    ) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Select { options },
            default: ParamValue::String(default.to_string()),
        }
    }

    /// Set the minimum accepted value (numeric parameters only)
    pub fn with_min(mut self, value: f64) -> Self {
        if let ParamKind::Number { min, .. } = &mut self.kind {
            *min = Some(value);
        }
        self
    }

    /// Set the maximum accepted value (numeric parameters only)
    pub fn with_max(mut self, value: f64) -> Self {
        if let ParamKind::Number { max, .. } = &mut self.kind {
            *max = Some(value);
        }
        self
    }

    /// Set the editor increment (numeric parameters only)
    pub fn with_step(mut self, value: f64) -> Self {
        if let ParamKind::Number { step, .. } = &mut self.kind {
            *step = Some(value);
        }
        self
    }
}

/// Ordered name-to-value map carried by a node instance
///
/// Backed by a `BTreeMap` so iteration and serialization order never depend
/// on insertion history.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamMap(BTreeMap<String, ParamValue>);

impl ParamMap {
    /// Creates an empty parameter map
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert or replace a value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a value by name
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Whether a value with this name is present
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Numeric value by name, if present and numeric
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParamValue::as_number)
    }

    /// Text value by name, if present and textual
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    /// Boolean value by name, if present and boolean
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ParamValue::as_bool)
    }

    /// Python literal rendering of a value, or `fallback` when absent
    ///
    /// Templates call this for every placeholder, so a missing key never
    /// aborts rendering.
    pub fn python(&self, name: &str, fallback: &str) -> String {
        self.get(name)
            .map(ParamValue::as_python)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Iterate entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    /// Names present in the map, in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ParamValue)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_rendering() {
        assert_eq!(ParamValue::Number(3.0).as_python(), "3");
        assert_eq!(ParamValue::Number(0.5).as_python(), "0.5");
        assert_eq!(ParamValue::Number(0.00001).as_python(), "0.00001");
        assert_eq!(ParamValue::Boolean(true).as_python(), "True");
        assert_eq!(ParamValue::Boolean(false).as_python(), "False");
        assert_eq!(
            ParamValue::String("[1, 3, 224, 224]".to_string()).as_python(),
            "[1, 3, 224, 224]"
        );
    }

    #[test]
    fn test_untagged_serde() {
        let json = r#"{"bias": true, "in_features": 512, "note": "float32", "p": 0.5}"#;
        let map: ParamMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.boolean("bias"), Some(true));
        assert_eq!(map.number("in_features"), Some(512.0));
        assert_eq!(map.text("note"), Some("float32"));
        assert_eq!(map.number("p"), Some(0.5));
    }

    #[test]
    fn test_integral_numbers_serialize_without_decimal() {
        let mut map = ParamMap::new();
        map.insert("padding", 1);
        map.insert("momentum", 0.1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"momentum":0.1,"padding":1}"#);
    }

    #[test]
    fn test_map_iterates_in_name_order() {
        let mut map = ParamMap::new();
        map.insert("stride", 1);
        map.insert("in_channels", 3);
        map.insert("kernel_size", 3);
        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["in_channels", "kernel_size", "stride"]);
    }

    #[test]
    fn test_python_fallback_for_missing_key() {
        let map = ParamMap::new();
        assert_eq!(map.python("kernel_size", "3"), "3");
    }

    #[test]
    fn test_spec_builders() {
        let spec = ParamSpec::number("p", "Dropout Rate", 0.5)
            .with_min(0.0)
            .with_max(1.0)
            .with_step(0.1);
        assert_eq!(spec.default, ParamValue::Number(0.5));
        match spec.kind {
            ParamKind::Number { min, max, step } => {
                assert_eq!(min, Some(0.0));
                assert_eq!(max, Some(1.0));
                assert_eq!(step, Some(0.1));
            }
            _ => panic!("expected numeric kind"),
        }
    }
}
