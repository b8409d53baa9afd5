//! Prompt construction

/// Word used when the caller gave no language hint.
const DEFAULT_SUBJECT: &str = "code";

/// Prompt sent to the provider. The code is embedded verbatim.
pub fn build_analysis_prompt(language: Option<&str>, code: &str) -> String {
    let subject = language
        .filter(|l| !l.trim().is_empty())
        .unwrap_or(DEFAULT_SUBJECT);
    format!(
        "Analyze the following {} for security issues and return a concise report:\n\n{}",
        subject, code
    )
}
