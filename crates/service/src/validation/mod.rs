//! Schema-driven parsing of untyped JSON payloads.
//!
//! A [`Validator`] walks a payload field by field. Every accessor checks one
//! field against a [`rules::Rule`] and records issues instead of returning
//! early, so a single pass reports every violated constraint in declaration
//! order. Accessors return `None` exactly when they recorded an issue.

pub mod rules;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use self::rules::Rule;

/// One field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("validation failed: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| if i.path.is_empty() { i.message.clone() } else { format!("{} {}", i.path, i.message) })
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn has_path(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.path == path)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }
}

enum Lookup<'a> {
    Absent,
    Null,
    Present(&'a Value),
}

pub struct Validator<'a> {
    fields: Option<&'a Map<String, Value>>,
    issues: Vec<ValidationIssue>,
}

impl<'a> Validator<'a> {
    /// A payload that is not a JSON object yields one root issue (empty
    /// path); field accessors then report nothing further.
    pub fn new(raw: &'a Value) -> Self {
        match raw.as_object() {
            Some(fields) => Self { fields: Some(fields), issues: Vec::new() },
            None => Self {
                fields: None,
                issues: vec![ValidationIssue::new("", "expected a JSON object")],
            },
        }
    }

    fn lookup(&self, name: &str) -> Lookup<'a> {
        match self.fields.and_then(|f| f.get(name)) {
            None => Lookup::Absent,
            Some(Value::Null) => Lookup::Null,
            Some(v) => Lookup::Present(v),
        }
    }

    fn check<R: Rule>(&mut self, name: &str, rule: &R, value: &Value) -> Option<R::Output> {
        match rule.check(value) {
            Ok(v) => Some(v),
            Err(messages) => {
                self.issues
                    .extend(messages.into_iter().map(|m| ValidationIssue::new(name, m)));
                None
            }
        }
    }

    fn root_failed(&self) -> bool {
        self.fields.is_none()
    }

    /// Field must be present and non-null.
    pub fn required<R: Rule>(&mut self, name: &str, rule: &R) -> Option<R::Output> {
        if self.root_failed() {
            return None;
        }
        match self.lookup(name) {
            Lookup::Absent | Lookup::Null => {
                self.issues.push(ValidationIssue::new(name, "is required"));
                None
            }
            Lookup::Present(v) => self.check(name, rule, v),
        }
    }

    /// Field may be absent or null; both read as `None`.
    pub fn optional<R: Rule>(&mut self, name: &str, rule: &R) -> Option<Option<R::Output>> {
        if self.root_failed() {
            return None;
        }
        match self.lookup(name) {
            Lookup::Absent | Lookup::Null => Some(None),
            Lookup::Present(v) => self.check(name, rule, v).map(Some),
        }
    }

    /// Update of a non-nullable column: absent means "keep", explicit null
    /// is rejected.
    pub fn patch<R: Rule>(&mut self, name: &str, rule: &R) -> Option<Option<R::Output>> {
        if self.root_failed() {
            return None;
        }
        match self.lookup(name) {
            Lookup::Absent => Some(None),
            Lookup::Null => {
                self.issues.push(ValidationIssue::new(name, "must not be null"));
                None
            }
            Lookup::Present(v) => self.check(name, rule, v).map(Some),
        }
    }

    /// Update of a nullable column: absent means "keep" (`None`), explicit
    /// null means "clear" (`Some(None)`).
    pub fn patch_nullable<R: Rule>(
        &mut self,
        name: &str,
        rule: &R,
    ) -> Option<Option<Option<R::Output>>> {
        if self.root_failed() {
            return None;
        }
        match self.lookup(name) {
            Lookup::Absent => Some(None),
            Lookup::Null => Some(Some(None)),
            Lookup::Present(v) => self.check(name, rule, v).map(|v| Some(Some(v))),
        }
    }

    /// The collected issues. Never empty: callers reach this only after an
    /// accessor returned `None`.
    pub fn into_error(mut self) -> ValidationError {
        if self.issues.is_empty() {
            self.issues.push(ValidationIssue::new("", "invalid payload"));
        }
        ValidationError { issues: self.issues }
    }
}

#[cfg(test)]
mod tests {
    use super::rules::{integer, text, uuid};
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_every_issue_in_declaration_order() {
        let raw = json!({ "code": "", "count": -1 });
        let mut v = Validator::new(&raw);
        let code = v.required("code", &text().len(1, 8));
        let name = v.required("name", &text());
        let count = v.required("count", &integer().non_negative());
        assert!(code.is_none() && name.is_none() && count.is_none());
        let err = v.into_error();
        assert_eq!(err.paths(), vec!["code", "name", "count"]);
        assert_eq!(err.issues[1].message, "is required");
    }

    #[test]
    fn non_object_payload_is_a_single_root_issue() {
        let raw = json!(["not", "an", "object"]);
        let mut v = Validator::new(&raw);
        assert!(v.required("code", &text()).is_none());
        assert!(v.optional("description", &text()).is_none());
        let err = v.into_error();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].path, "");
    }

    #[test]
    fn optional_reads_null_and_absent_as_none() {
        let raw = json!({ "a": null });
        let mut v = Validator::new(&raw);
        assert_eq!(v.optional("a", &text()), Some(None));
        assert_eq!(v.optional("b", &text()), Some(None));
        assert!(v.issues.is_empty());
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let raw = json!({ "description": null, "code": null });
        let mut v = Validator::new(&raw);
        assert_eq!(v.patch_nullable("description", &text()), Some(Some(None)));
        assert_eq!(v.patch_nullable("region", &text()), Some(None));
        assert_eq!(v.patch("displayName", &text()), Some(None));
        assert_eq!(v.patch("code", &text()), None);
        let err = v.into_error();
        assert_eq!(err.paths(), vec!["code"]);
        assert_eq!(err.issues[0].message, "must not be null");
    }

    #[test]
    fn error_message_lists_issues() {
        let raw = json!({ "ref": "nope" });
        let mut v = Validator::new(&raw);
        assert!(v.required("ref", &uuid()).is_none());
        let err = v.into_error();
        assert_eq!(err.to_string(), "validation failed: ref must be a valid UUID");
        assert!(err.has_path("ref"));
    }
}
