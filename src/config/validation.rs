//! Validation engine for ranking configurations.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`RankConfig`] and collects every diagnostic into a [`ValidationReport`].
//! It never stops at the first error, so a caller sees all problems at once.
//!
//! ```rust
//! use rapid_pagerank::config::validation::ValidationEngine;
//! use rapid_pagerank::RankConfig;
//!
//! let report = ValidationEngine::with_defaults().validate(&RankConfig::default());
//! assert!(report.is_valid());
//! ```

use serde::Serialize;

use super::issue::{ConfigIssue, IssueCode};
use super::RankConfig;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub issue: ConfigIssue,
}

impl ValidationDiagnostic {
    pub fn error(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Error,
            issue,
        }
    }

    pub fn warning(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Warning,
            issue,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.issue)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.issue)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`RankConfig`] and returns
/// zero or more diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"damping_range"`).
    fn name(&self) -> &str;

    /// Inspect `cfg` and return any findings.
    fn validate(&self, cfg: &RankConfig) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s and collects their findings.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(DampingRangeRule));
        engine.add_rule(Box::new(IterationBoundRule));
        engine.add_rule(Box::new(ToleranceRule));
        engine.add_rule(Box::new(InputLimitsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `cfg` and return the collected report.
    pub fn validate(&self, cfg: &RankConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(cfg));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. damping is a probability ────────────────────────────────────────────

struct DampingRangeRule;

impl ValidationRule for DampingRangeRule {
    fn name(&self) -> &str {
        "damping_range"
    }

    fn validate(&self, cfg: &RankConfig) -> Vec<ValidationDiagnostic> {
        let d = cfg.damping;
        if !d.is_finite() || !(0.0..=1.0).contains(&d) {
            return vec![ValidationDiagnostic::error(
                ConfigIssue::new(
                    IssueCode::OutOfRange,
                    "/damping",
                    format!("damping must lie in [0, 1], got {d}"),
                )
                .with_hint("0.85 is the usual choice"),
            )];
        }
        if d == 0.0 || d == 1.0 {
            // 0 ignores every link, 1 disables teleportation
            return vec![ValidationDiagnostic::warning(ConfigIssue::new(
                IssueCode::OutOfRange,
                "/damping",
                format!("damping of {d} degenerates the ranking"),
            ))];
        }
        vec![]
    }
}

// ─── 2. iteration bound must allow at least one step ────────────────────────

struct IterationBoundRule;

impl ValidationRule for IterationBoundRule {
    fn name(&self) -> &str {
        "iteration_bound"
    }

    fn validate(&self, cfg: &RankConfig) -> Vec<ValidationDiagnostic> {
        if cfg.max_iterations == 0 {
            vec![ValidationDiagnostic::error(
                ConfigIssue::new(
                    IssueCode::LimitExceeded,
                    "/max_iterations",
                    "max_iterations must be greater than 0",
                )
                .with_hint("Omit the field to use the default bound"),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 3. tolerance is positive and not absurdly coarse ───────────────────────

struct ToleranceRule;

impl ValidationRule for ToleranceRule {
    fn name(&self) -> &str {
        "tolerance"
    }

    fn validate(&self, cfg: &RankConfig) -> Vec<ValidationDiagnostic> {
        let t = cfg.tolerance;
        if !t.is_finite() || t <= 0.0 {
            vec![ValidationDiagnostic::error(ConfigIssue::new(
                IssueCode::OutOfRange,
                "/tolerance",
                format!("tolerance must be a positive number, got {t}"),
            ))]
        } else if t > 0.01 {
            vec![ValidationDiagnostic::warning(
                ConfigIssue::new(
                    IssueCode::OutOfRange,
                    "/tolerance",
                    format!("tolerance {t} is coarser than a percentage point"),
                )
                .with_hint("Ranks are printed to 0.01%; keep the tolerance well below that"),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 4. input limits are positive and fit the page count ────────────────────

struct InputLimitsRule;

impl ValidationRule for InputLimitsRule {
    fn name(&self) -> &str {
        "input_limits"
    }

    fn validate(&self, cfg: &RankConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if cfg.max_input_values == 0 {
            out.push(ValidationDiagnostic::error(ConfigIssue::new(
                IssueCode::LimitExceeded,
                "/max_input_values",
                "max_input_values must be greater than 0",
            )));
        }

        match cfg.page_count {
            Some(0) => out.push(ValidationDiagnostic::error(
                ConfigIssue::new(
                    IssueCode::OutOfRange,
                    "/page_count",
                    "page_count must be greater than 0",
                )
                .with_hint("Remove page_count to accept any square input"),
            )),
            Some(n) if n.saturating_mul(n) > cfg.max_input_values => {
                out.push(ValidationDiagnostic::error(ConfigIssue::new(
                    IssueCode::LimitExceeded,
                    "/page_count",
                    format!(
                        "{n} pages need {} values but max_input_values is {}",
                        n.saturating_mul(n),
                        cfg.max_input_values
                    ),
                )));
            }
            _ => {}
        }

        out
    }
}

// ─── 5. unknown fields ──────────────────────────────────────────────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, cfg: &RankConfig) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<_> = cfg.unknown_fields.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                ValidationDiagnostic::warning(
                    ConfigIssue::new(
                        IssueCode::UnknownField,
                        format!("/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
