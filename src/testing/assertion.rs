use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::ApiResponse;

/// Target of an assertion within the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum AssertionTarget {
    StatusCode,
    Header(String),
    /// Dotted path into the JSON body: `name`, `tags.0.name`, `$` for the root.
    JsonPath(String),
    BodyContains,
    /// Wall-clock duration of the exchange in milliseconds.
    ResponseTime,
}

/// Comparison operator for an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    Exists,
    /// `expected` is a comma-separated list of accepted values.
    OneOf,
    /// `expected` is one of `array`, `object`, `string`, `number`, `boolean`, `null`.
    IsType,
}

/// A single assertion that can be evaluated against a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    pub target: AssertionTarget,
    pub operator: AssertionOperator,
    pub expected: String,
}

/// Result of evaluating an assertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionResult {
    pub assertion: Assertion,
    pub passed: bool,
    pub actual: String,
    pub message: String,
}

impl Assertion {
    pub fn new(target: AssertionTarget, operator: AssertionOperator, expected: impl Into<String>) -> Self {
        Self {
            target,
            operator,
            expected: expected.into(),
        }
    }

    pub fn status(code: u16) -> Self {
        Self::new(AssertionTarget::StatusCode, AssertionOperator::Equals, code.to_string())
    }

    pub fn status_in(codes: &[u16]) -> Self {
        let expected = codes
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self::new(AssertionTarget::StatusCode, AssertionOperator::OneOf, expected)
    }

    pub fn json_eq(path: &str, expected: impl Display) -> Self {
        Self::new(
            AssertionTarget::JsonPath(path.to_string()),
            AssertionOperator::Equals,
            expected.to_string(),
        )
    }

    pub fn json_exists(path: &str) -> Self {
        Self::new(AssertionTarget::JsonPath(path.to_string()), AssertionOperator::Exists, "")
    }

    pub fn json_type(path: &str, kind: &str) -> Self {
        Self::new(AssertionTarget::JsonPath(path.to_string()), AssertionOperator::IsType, kind)
    }

    pub fn json_contains(path: &str, needle: &str) -> Self {
        Self::new(AssertionTarget::JsonPath(path.to_string()), AssertionOperator::Contains, needle)
    }

    pub fn body_contains(needle: &str) -> Self {
        Self::new(AssertionTarget::BodyContains, AssertionOperator::Contains, needle)
    }

    pub fn header_exists(name: &str) -> Self {
        Self::new(AssertionTarget::Header(name.to_string()), AssertionOperator::Exists, "")
    }

    pub fn response_time_below(ms: u64) -> Self {
        Self::new(AssertionTarget::ResponseTime, AssertionOperator::LessThan, ms.to_string())
    }

    pub fn evaluate(&self, response: &ApiResponse) -> AssertionResult {
        let actual = self.actual_value(response);
        let passed = match &actual {
            None => false,
            Some(_) if self.operator == AssertionOperator::Exists => true,
            Some(value) => self.compare(value),
        };

        let actual_text = match &actual {
            Some(value) => value.render(),
            None => "<missing>".to_string(),
        };
        let message = if passed {
            format!("{self}")
        } else {
            format!("expected {self}, got {actual_text}")
        };

        AssertionResult {
            assertion: self.clone(),
            passed,
            actual: actual_text,
            message,
        }
    }

    fn actual_value(&self, response: &ApiResponse) -> Option<Actual> {
        match &self.target {
            AssertionTarget::StatusCode => Some(Actual::Text(response.status.to_string())),
            AssertionTarget::Header(name) => response.header(name).map(|v| Actual::Text(v.to_string())),
            AssertionTarget::BodyContains => Some(Actual::Text(response.body.clone())),
            AssertionTarget::ResponseTime => Some(Actual::Text(response.duration_ms.to_string())),
            AssertionTarget::JsonPath(path) => {
                let root: Value = serde_json::from_str(&response.body).ok()?;
                lookup(&root, path).cloned().map(Actual::Json)
            }
        }
    }

    fn compare(&self, actual: &Actual) -> bool {
        let text = actual.render();
        match self.operator {
            AssertionOperator::Equals => text == self.expected,
            AssertionOperator::NotEquals => text != self.expected,
            AssertionOperator::Contains => actual.contains(&self.expected),
            AssertionOperator::GreaterThan => compare_numbers(&text, &self.expected, |a, b| a > b),
            AssertionOperator::LessThan => compare_numbers(&text, &self.expected, |a, b| a < b),
            AssertionOperator::Exists => true,
            AssertionOperator::OneOf => self.expected.split(',').any(|option| option.trim() == text),
            AssertionOperator::IsType => actual.type_name() == self.expected,
        }
    }
}

impl Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.target {
            AssertionTarget::StatusCode => "status".to_string(),
            AssertionTarget::Header(name) => format!("header `{name}`"),
            AssertionTarget::JsonPath(path) => format!("body `{path}`"),
            AssertionTarget::BodyContains => "body".to_string(),
            AssertionTarget::ResponseTime => "response time (ms)".to_string(),
        };
        let operator = match self.operator {
            AssertionOperator::Equals => "==",
            AssertionOperator::NotEquals => "!=",
            AssertionOperator::Contains => "contains",
            AssertionOperator::GreaterThan => ">",
            AssertionOperator::LessThan => "<",
            AssertionOperator::Exists => "exists",
            AssertionOperator::OneOf => "in",
            AssertionOperator::IsType => "is",
        };
        if self.operator == AssertionOperator::Exists {
            write!(f, "{target} {operator}")
        } else {
            write!(f, "{target} {operator} {}", self.expected)
        }
    }
}

/// Value pulled out of a response for comparison.
enum Actual {
    Text(String),
    Json(Value),
}

impl Actual {
    /// Strings render bare, everything else as compact JSON.
    fn render(&self) -> String {
        match self {
            Actual::Text(text) => text.clone(),
            Actual::Json(Value::String(text)) => text.clone(),
            Actual::Json(value) => value.to_string(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        match self {
            Actual::Json(Value::Array(items)) => items.iter().any(|item| match item {
                Value::String(text) => text == needle,
                other => other.to_string() == needle,
            }),
            other => other.render().contains(needle),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Actual::Text(_) => "string",
            Actual::Json(Value::Null) => "null",
            Actual::Json(Value::Bool(_)) => "boolean",
            Actual::Json(Value::Number(_)) => "number",
            Actual::Json(Value::String(_)) => "string",
            Actual::Json(Value::Array(_)) => "array",
            Actual::Json(Value::Object(_)) => "object",
        }
    }
}

fn compare_numbers(actual: &str, expected: &str, op: impl Fn(f64, f64) -> bool) -> bool {
    match (actual.trim().parse::<f64>(), expected.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => op(a, b),
        _ => false,
    }
}

/// Resolve a dotted path; numeric segments index arrays.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.trim();
    let path = path.strip_prefix('$').unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);
    if path.is_empty() {
        return Some(root);
    }

    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
