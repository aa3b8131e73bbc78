//! Markdown report assembly
//!
//! Pure string building: no I/O, no clock, no randomness. The same
//! outcome, signals and dashboard org always produce byte-identical
//! output, which is what makes the comment upsert idempotent.

use crate::domain::{ScanOutcome, ScanSignals, Violation};

use super::escape::{encode_path_segment, escape_code_span, escape_link_destination, escape_text};

/// Substring used to recognize a previously posted report comment. The
/// report's first line is this marker behind a `## ` heading.
pub const COMMENT_MARKER: &str = "🔍 FOSSA License Scan Results";

const DASHBOARD_BASE_URL: &str = "https://app.fossa.com/projects";

pub fn render_report(outcome: &ScanOutcome, signals: &ScanSignals, dashboard_org: &str) -> String {
    let mut out = String::new();
    out.push_str("## ");
    out.push_str(COMMENT_MARKER);
    out.push_str("\n\n");

    match outcome {
        ScanOutcome::Issues(violations) => push_issues(&mut out, violations),
        ScanOutcome::Clean => push_clean(&mut out),
        ScanOutcome::PolicyViolationUnparsed => push_unparsed(&mut out),
        ScanOutcome::ScanFailed => push_failed(&mut out, signals),
    }

    push_summary(&mut out, signals);
    push_footer(&mut out, signals, dashboard_org);
    out
}

fn push_issues(out: &mut String, violations: &[Violation]) {
    out.push_str("### ⚠️ License Compliance Issues Found\n\n");
    let plural = if violations.len() > 1 { "s" } else { "" };
    out.push_str(&format!("Found {} license policy violation{plural}:\n\n", violations.len()));

    for (index, violation) in violations.iter().enumerate() {
        out.push_str(&format!("**{}. License Policy Violation**\n", index + 1));

        if let Some(license) = violation.license.as_deref() {
            out.push_str(&format!("- **License**: {}\n", escape_text(license)));
        }
        if let Some(package) = violation.package_name() {
            out.push_str(&format!("- **Package**: `{}`\n", escape_code_span(package)));
        }
        if let Some(kind) = violation.kind.as_deref() {
            out.push_str(&format!("- **Type**: {}\n", escape_text(kind)));
        }
        if let Some(rule_title) = violation.rule_title.as_deref() {
            out.push_str(&format!("- **Rule**: {}\n", escape_text(rule_title)));
        }
        if let Some(url) = violation.issue_dash_url.as_deref() {
            out.push_str(&format!(
                "- **Details**: [View in FOSSA Dashboard]({})\n",
                escape_link_destination(url)
            ));
        }

        out.push('\n');
    }

    out.push_str("### 📋 Next Steps\n");
    out.push_str("1. Review the license violations above\n");
    out.push_str("2. Consider replacing dependencies with incompatible licenses\n");
    out.push_str("3. Consult with legal team if needed\n");
    out.push_str("4. Update your project's license policy if appropriate\n\n");
}

fn push_clean(out: &mut String) {
    out.push_str("### ✅ All Clear!\n\n");
    out.push_str(
        "No license compliance issues found. Your dependencies are compliant with the configured policies.\n\n",
    );
}

fn push_unparsed(out: &mut String) {
    out.push_str("### ❌ Policy Violations Found\n\n");
    out.push_str(
        "FOSSA detected license policy violations, but could not parse the detailed results. Please check the workflow logs and FOSSA dashboard for details.\n\n",
    );
}

fn push_failed(out: &mut String, signals: &ScanSignals) {
    out.push_str("### ❌ Scan Failed\n\n");
    out.push_str(&format!(
        "The FOSSA scan encountered an error (exit code: {}). Please check the workflow logs for details.\n\n",
        escape_text(signals.exit_code_display())
    ));
}

fn push_summary(out: &mut String, signals: &ScanSignals) {
    out.push_str("### 📊 Scan Summary\n");
    out.push_str(&format!("- **Project**: {}\n", escape_text(&signals.project)));
    out.push_str(&format!(
        "- **Violations Found**: {}\n",
        if signals.violations_found { "Yes" } else { "No" }
    ));
    if signals.violations_found {
        out.push_str(&format!(
            "- **Total Violations**: {}\n",
            escape_text(&signals.violations_count)
        ));
    }
    out.push_str(&format!("- **Exit Code**: {}\n\n", escape_text(signals.exit_code_display())));
}

fn push_footer(out: &mut String, signals: &ScanSignals, dashboard_org: &str) {
    let locator = encode_path_segment(&format!("{dashboard_org}/{}", signals.project));
    out.push_str("---\n");
    out.push_str(&format!(
        "🔗 [View detailed report in FOSSA Dashboard]({DASHBOARD_BASE_URL}/{locator})\n"
    ));
    out.push_str(&format!("📊 [FOSSA Status]({DASHBOARD_BASE_URL}/{locator}?ref=badge_small)\n\n"));
    out.push_str(
        "*Scan powered by [FOSSA License Scanner](https://github.com/marketplace/actions/fossa-license-scanner)*",
    );
}
