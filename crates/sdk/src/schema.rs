//! Declarative input schemas.
//!
//! Each API operation declares its accepted parameters as an [`InputSchema`].
//! The schema is enforced on every request before it is sent, and it is
//! independent of how the request type happens to be serialized.

use crate::error::{LeadMagicError, LeadMagicResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use url::Url;

/// A single problem found while validating input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Type and format constraint of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Non-empty string.
    String,
    /// Email address.
    Email,
    /// Absolute http(s) URL.
    Url,
    /// Whole number within optional bounds.
    Integer { min: Option<i64>, max: Option<i64> },
    /// One of a fixed set of strings.
    Enum(&'static [&'static str]),
}

/// Declaration of one input field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
}

impl FieldSpec {
    pub fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            required: true,
            default: None,
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
            default: None,
        }
    }

    /// Value filled in when the field is absent.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn check(&self, value: &Value) -> Result<(), String> {
        match &self.kind {
            FieldKind::String => non_empty_str(value).map(|_| ()),
            FieldKind::Email => {
                let s = non_empty_str(value)?;
                if is_email(s) {
                    Ok(())
                } else {
                    Err("must be a valid email address".to_string())
                }
            }
            FieldKind::Url => {
                let s = non_empty_str(value)?;
                match Url::parse(s) {
                    Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
                    Ok(url) => Err(format!(
                        "must be an http(s) URL, got scheme '{}'",
                        url.scheme()
                    )),
                    Err(e) => Err(format!("must be a valid URL ({})", e)),
                }
            }
            FieldKind::Integer { min, max } => {
                let n = value
                    .as_i64()
                    .ok_or_else(|| format!("must be an integer, got {}", type_name(value)))?;
                if let Some(min) = min {
                    if n < *min {
                        return Err(format!("must be at least {}", min));
                    }
                }
                if let Some(max) = max {
                    if n > *max {
                        return Err(format!("must be at most {}", max));
                    }
                }
                Ok(())
            }
            FieldKind::Enum(allowed) => {
                let s = value
                    .as_str()
                    .ok_or_else(|| format!("must be a string, got {}", type_name(value)))?;
                if allowed.contains(&s) {
                    Ok(())
                } else {
                    Err(format!("must be one of: {}", allowed.join(", ")))
                }
            }
        }
    }
}

/// Accepted parameters of one API operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSchema {
    fields: Vec<FieldSpec>,
    any_of: Vec<&'static [&'static str]>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Require that at least one of `names` is present. Any non-empty subset
    /// is accepted.
    pub fn at_least_one_of(mut self, names: &'static [&'static str]) -> Self {
        self.any_of.push(names);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn any_of_groups(&self) -> &[&'static [&'static str]] {
        &self.any_of
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate `input` and return the normalized parameter object.
    ///
    /// `null` input is treated as an empty object and `null` fields as
    /// absent. Absent optional fields are left out, declared defaults are
    /// filled in and undeclared fields are dropped. All issues are reported
    /// together.
    pub fn validate(&self, input: &Value) -> LeadMagicResult<Map<String, Value>> {
        let empty = Map::new();
        let object = match input {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(LeadMagicError::validation(
                    "arguments",
                    format!("must be an object, got {}", type_name(other)),
                ))
            }
        };

        let mut issues = Vec::new();
        let mut normalized = Map::new();

        for spec in &self.fields {
            match object.get(spec.name).filter(|v| !v.is_null()) {
                Some(value) => match spec.check(value) {
                    Ok(()) => {
                        normalized.insert(spec.name.to_string(), value.clone());
                    }
                    Err(message) => issues.push(FieldIssue::new(spec.name, message)),
                },
                None => {
                    if let Some(default) = &spec.default {
                        normalized.insert(spec.name.to_string(), default.clone());
                    } else if spec.required {
                        issues.push(FieldIssue::new(spec.name, "is required"));
                    }
                }
            }
        }

        for group in &self.any_of {
            let present = group.iter().any(|name| {
                object
                    .get(*name)
                    .map(|v| !v.is_null())
                    .unwrap_or(false)
            });
            if !present {
                issues.push(FieldIssue::new(
                    group.join("|"),
                    format!("at least one of {} is required", group.join(", ")),
                ));
            }
        }

        if issues.is_empty() {
            Ok(normalized)
        } else {
            Err(LeadMagicError::Validation { issues })
        }
    }
}

fn non_empty_str(value: &Value) -> Result<&str, String> {
    let s = value
        .as_str()
        .ok_or_else(|| format!("must be a string, got {}", type_name(value)))?;
    if s.trim().is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(s)
    }
}

fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Shared field declarations used by several operations.

pub(crate) fn page_field() -> FieldSpec {
    FieldSpec::optional(
        "page",
        FieldKind::Integer {
            min: Some(1),
            max: Some(i64::from(u32::MAX)),
        },
        "Page number to fetch (default: 1)",
    )
    .with_default(1)
}

pub(crate) fn per_page_field() -> FieldSpec {
    FieldSpec::optional(
        "per_page",
        FieldKind::Integer {
            min: Some(1),
            max: Some(50),
        },
        "Results per page, at most 50 (default: 20)",
    )
    .with_default(20)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn lookup_schema() -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::optional(
                "company_domain",
                FieldKind::String,
                "Company domain",
            ))
            .field(FieldSpec::optional(
                "company_name",
                FieldKind::String,
                "Company name",
            ))
            .field(FieldSpec::optional("profile_url", FieldKind::Url, "Profile URL"))
            .at_least_one_of(&["company_domain", "company_name", "profile_url"])
    }

    fn issues(err: LeadMagicError) -> Vec<FieldIssue> {
        match err {
            LeadMagicError::Validation { issues } => issues,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let schema = InputSchema::new().field(FieldSpec::required(
            "email",
            FieldKind::Email,
            "Email",
        ));

        let err = schema.validate(&json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(issues(err), vec![FieldIssue::new("email", "is required")]);
    }

    #[test]
    fn test_email_format() {
        let schema = InputSchema::new().field(FieldSpec::required(
            "email",
            FieldKind::Email,
            "Email",
        ));

        assert!(schema.validate(&json!({"email": "john@example.com"})).is_ok());
        for bad in ["john", "john@", "@example.com", "john@example", "jo hn@example.com"] {
            assert!(
                schema.validate(&json!({ "email": bad })).is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let schema = InputSchema::new().field(FieldSpec::required(
            "company_name",
            FieldKind::String,
            "Company",
        ));

        let err = schema.validate(&json!({"company_name": 42})).unwrap_err();
        let issues = issues(err);
        assert_eq!(issues[0].field, "company_name");
        assert!(issues[0].message.contains("string"));
    }

    #[test]
    fn test_optional_absent_fields_are_not_emitted() {
        let schema = InputSchema::new()
            .field(FieldSpec::required("email", FieldKind::Email, "Email"))
            .field(FieldSpec::optional("first_name", FieldKind::String, "First"));

        let params = schema
            .validate(&json!({"email": "a@b.co", "first_name": null}))
            .unwrap();
        assert_eq!(Value::Object(params), json!({"email": "a@b.co"}));
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let schema = InputSchema::new().field(FieldSpec::required(
            "ad_id",
            FieldKind::String,
            "Ad",
        ));

        let params = schema
            .validate(&json!({"ad_id": "123", "api_key": "leak"}))
            .unwrap();
        assert!(!params.contains_key("api_key"));
    }

    #[test]
    fn test_pagination_defaults_and_bounds() {
        let schema = InputSchema::new().field(page_field()).field(per_page_field());

        let params = schema.validate(&Value::Null).unwrap();
        assert_eq!(params["page"], json!(1));
        assert_eq!(params["per_page"], json!(20));

        let params = schema.validate(&json!({"page": 2, "per_page": 10})).unwrap();
        assert_eq!(Value::Object(params), json!({"page": 2, "per_page": 10}));

        let err = schema.validate(&json!({"per_page": 51})).unwrap_err();
        assert_eq!(issues(err), vec![FieldIssue::new("per_page", "must be at most 50")]);

        assert!(schema.validate(&json!({"page": 0})).is_err());
        assert!(schema.validate(&json!({"page": 1.5})).is_err());

        let err = schema.validate(&json!({"page": 4_294_967_296u64})).unwrap_err();
        assert_eq!(issues(err)[0].field, "page");
        assert!(schema.validate(&json!({"page": u32::MAX})).is_ok());
    }

    #[test]
    fn test_any_of_accepts_any_non_empty_subset() {
        let schema = lookup_schema();

        assert!(schema.validate(&json!({"company_domain": "acme.com"})).is_ok());
        assert!(schema.validate(&json!({"company_name": "Acme"})).is_ok());
        assert!(schema
            .validate(&json!({
                "company_domain": "acme.com",
                "company_name": "Acme",
                "profile_url": "https://www.linkedin.com/company/acme"
            }))
            .is_ok());

        let err = schema.validate(&json!({})).unwrap_err();
        let issues = issues(err);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "company_domain|company_name|profile_url");
    }

    #[test]
    fn test_url_format() {
        let schema = lookup_schema();

        let err = schema
            .validate(&json!({"profile_url": "ftp://example.com/x"}))
            .unwrap_err();
        assert!(issues(err)[0].message.contains("http(s)"));
        assert!(schema.validate(&json!({"profile_url": "not a url"})).is_err());
    }

    #[test]
    fn test_enum_values() {
        let schema = InputSchema::new().field(FieldSpec::optional(
            "experience_level",
            FieldKind::Enum(&["entry", "senior"]),
            "Level",
        ));

        assert!(schema.validate(&json!({"experience_level": "senior"})).is_ok());
        let err = schema
            .validate(&json!({"experience_level": "wizard"}))
            .unwrap_err();
        assert!(issues(err)[0].message.contains("entry, senior"));
    }

    #[test]
    fn test_all_issues_reported_together() {
        let schema = InputSchema::new()
            .field(FieldSpec::required("first_name", FieldKind::String, "First"))
            .field(FieldSpec::required("last_name", FieldKind::String, "Last"));

        let err = schema.validate(&json!({"first_name": ""})).unwrap_err();
        let fields: Vec<_> = issues(err).into_iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["first_name", "last_name"]);
    }

    #[test]
    fn test_non_object_input_rejected() {
        let schema = InputSchema::new();
        let err = schema.validate(&json!(["a"])).unwrap_err();
        assert_eq!(issues(err)[0].field, "arguments");
    }
}
