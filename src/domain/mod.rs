//! Core types: violation records, scan signals, outcome classification

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Revision locators look like `ecosystem+package@version`.
static REVISION_LOCATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+\+(.+)$").expect("valid regex"));

/// One reported license-policy issue. Every field is optional; scanners
/// omit or reshape fields freely and a record with nothing usable in it
/// still counts as a violation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violation {
    pub license: Option<String>,
    pub revision_id: Option<String>,
    pub kind: Option<String>,
    pub rule_title: Option<String>,
    pub issue_dash_url: Option<String>,
}

impl Violation {
    /// Extracts a violation from one element of the results list. Fields
    /// that are absent or not strings are dropped rather than failing the
    /// whole record.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            license: field("license"),
            revision_id: field("revisionId"),
            kind: field("type"),
            rule_title: value
                .get("rule")
                .and_then(|rule| rule.get("title"))
                .and_then(Value::as_str)
                .map(str::to_string),
            issue_dash_url: field("issueDashURL"),
        }
    }

    /// Package portion of the revision locator: the suffix after the first
    /// `+`. Locators without a `+` separator come back verbatim.
    pub fn package_name(&self) -> Option<&str> {
        let revision_id = self.revision_id.as_deref()?;
        match REVISION_LOCATOR.captures(revision_id) {
            Some(caps) => Some(caps.get(1).map_or(revision_id, |m| m.as_str())),
            None => Some(revision_id),
        }
    }
}

/// Process-level signals accompanying the results file. The exit code and
/// count stay strings; they are compared and displayed as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSignals {
    pub project: String,
    pub exit_code: Option<String>,
    pub violations_found: bool,
    pub violations_count: String,
}

impl Default for ScanSignals {
    fn default() -> Self {
        Self {
            project: "unknown".to_string(),
            exit_code: None,
            violations_found: false,
            violations_count: "0".to_string(),
        }
    }
}

impl ScanSignals {
    pub fn exit_code_display(&self) -> &str {
        self.exit_code.as_deref().unwrap_or("unknown")
    }
}

/// What the report says happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The results file yielded at least one violation.
    Issues(Vec<Violation>),
    /// No issues and the scanner exited 0.
    Clean,
    /// The scanner exited 1 (policy violation) but no issues could be
    /// parsed from the results file.
    PolicyViolationUnparsed,
    /// Any other exit code, or none at all.
    ScanFailed,
}

impl ScanOutcome {
    /// Combines parsed results with the scanner exit code. A non-empty
    /// violation list wins regardless of what the exit code says.
    pub fn classify(parsed: Option<Vec<Violation>>, exit_code: Option<&str>) -> Self {
        if let Some(violations) = parsed {
            if !violations.is_empty() {
                return Self::Issues(violations);
            }
        }
        match exit_code {
            Some("0") => Self::Clean,
            Some("1") => Self::PolicyViolationUnparsed,
            _ => Self::ScanFailed,
        }
    }
}
