use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::fmt;
use utoipa::ToSchema;

/// Matches the address against a lightweight structural pattern and extracts
/// the domain used by the MX stage.
///
/// # Examples
/// ```
/// use email_validator::validation::{Checked, syntax::SyntaxCheck};
///
/// let check = SyntaxCheck::new().unwrap();
/// assert_eq!(check.check("user@example.com"), Checked::Passed("example.com".to_string()));
/// assert!(!check.check("not-an-email").is_passed());
/// ```
pub mod syntax;

/// Looks up MX records for a domain and yields the hosts ordered by preference.
pub mod dnsmx;

/// Tries a plain TCP connection to the SMTP port of each MX host in turn.
pub mod smtp;

/// Runs the three checks in order and assembles the [`ValidationReport`].
pub mod pipeline;



/// Result of a single check.
///
/// A passing check carries the byproduct the next stage consumes (the domain,
/// the MX host list). A failing one carries the client-facing reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checked<T> {
    Passed(T),
    Failed(String),
}

impl<T> Checked<T> {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed(_))
    }

    /// Splits into the recorded outcome and the byproduct, if any.
    pub fn into_parts(self) -> (CheckOutcome, Option<T>) {
        match self {
            Self::Passed(value) => (CheckOutcome::valid(), Some(value)),
            Self::Failed(reason) => (CheckOutcome::invalid(reason), None),
        }
    }
}

/// # Check Outcome
///
/// Per-stage verdict as it appears under `validators` in the response.
/// `reason` is only present when `valid` is `false`.
///
/// ## Example JSON
/// ```json
/// { "valid": false, "reason": "No MX records for the domain" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CheckOutcome {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CheckOutcome {
    pub fn valid() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Syntax,
    Mx,
    Smtp,
}

impl Stage {
    #[cfg(test)]
    pub const ALL: [Stage; 3] = [Stage::Syntax, Stage::Mx, Stage::Smtp];

    /// Key used for the stage in the `validators` object.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Syntax => "syntax",
            Stage::Mx => "mx",
            Stage::Smtp => "smtp",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// # Validation Report
///
/// Composite verdict for one address. `checks` holds one entry per stage that
/// actually ran, in execution order. Once a stage fails nothing is appended.
///
/// ## Example JSON
/// ```json
/// {
///   "valid": false,
///   "validators": {
///     "syntax": { "valid": true },
///     "mx": { "valid": false, "reason": "No MX records for the domain" }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(rename = "validators", serialize_with = "serialize_checks")]
    #[schema(value_type = Object)]
    checks: Vec<(Stage, CheckOutcome)>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            valid: true,
            checks: Vec::new(),
        }
    }
}

impl ValidationReport {
    /// Appends the outcome of `stage` and returns its byproduct when it passed.
    pub fn record<T>(&mut self, stage: Stage, checked: Checked<T>) -> Option<T> {
        let (outcome, output) = checked.into_parts();
        self.valid = self.valid && outcome.valid;
        self.checks.push((stage, outcome));
        output
    }

    pub fn checks(&self) -> &[(Stage, CheckOutcome)] {
        &self.checks
    }

    pub fn outcome(&self, stage: Stage) -> Option<&CheckOutcome> {
        self.checks
            .iter()
            .find(|(recorded, _)| *recorded == stage)
            .map(|(_, outcome)| outcome)
    }
}

fn serialize_checks<S>(checks: &[(Stage, CheckOutcome)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(checks.len()))?;
    for (stage, outcome) in checks {
        map.serialize_entry(stage.name(), outcome)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_outcome_omits_reason() {
        let value = serde_json::to_value(CheckOutcome::valid()).unwrap();
        assert_eq!(value, json!({ "valid": true }));
    }

    #[test]
    fn test_invalid_outcome_carries_reason() {
        let value = serde_json::to_value(CheckOutcome::invalid("MX Lookup failed")).unwrap();
        assert_eq!(value, json!({ "valid": false, "reason": "MX Lookup failed" }));
    }

    #[test]
    fn test_record_returns_byproduct_only_on_success() {
        let mut report = ValidationReport::default();
        let domain = report.record(Stage::Syntax, Checked::Passed("example.com".to_string()));
        assert_eq!(domain.as_deref(), Some("example.com"));
        assert!(report.valid);

        let hosts: Option<Vec<String>> = report.record(Stage::Mx, Checked::failed("MX Lookup failed"));
        assert!(hosts.is_none());
        assert!(!report.valid);
        assert_eq!(report.checks().len(), 2);
    }

    #[test]
    fn test_report_serializes_in_execution_order() {
        let mut report = ValidationReport::default();
        report.record(Stage::Syntax, Checked::Passed(()));
        report.record(Stage::Mx, Checked::Passed(()));
        report.record::<()>(Stage::Smtp, Checked::failed("mx1.example.com: connection refused"));

        let body = serde_json::to_string(&report).unwrap();
        assert_eq!(
            body,
            r#"{"valid":false,"validators":{"syntax":{"valid":true},"mx":{"valid":true},"smtp":{"valid":false,"reason":"mx1.example.com: connection refused"}}}"#
        );
    }

    #[test]
    fn test_stage_names() {
        let names: Vec<&str> = Stage::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["syntax", "mx", "smtp"]);
        assert_eq!(Stage::Mx.to_string(), "mx");
    }
}
