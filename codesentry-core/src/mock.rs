//! Placeholder analysis returned when no real provider answer is available

/// Reason used by the standalone mock server.
pub const SIMPLE_SERVER_REASON: &str = "simple server";

/// Footer appended by the standalone mock server.
pub const SIMPLE_SERVER_HINT: &str =
    "Hint: To enable real Gemini calls, run the full backend with GEMINI_API_KEY and GEMINI_API_URL.";

/// Deterministic mock report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAnalysis<'a> {
    reason: &'a str,
    language: Option<&'a str>,
    model: Option<&'a str>,
    hint: Option<&'a str>,
}

impl<'a> MockAnalysis<'a> {
    pub fn new(reason: &'a str) -> Self {
        Self {
            reason,
            language: None,
            model: None,
            hint: None,
        }
    }

    pub fn with_language(mut self, language: Option<&'a str>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }

    pub fn with_model(mut self, model: Option<&'a str>) -> Self {
        self.model = model.filter(|m| !m.trim().is_empty());
        self
    }

    pub fn with_hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn render(&self) -> String {
        let mut text = format!(
            "🔍 Mock Analysis ({})\n\nLanguage: {}\nModel: {}\n\n\
             Found 2 potential issues:\n\n\
             1. Line 3: Missing error handling for async operation → Add try-catch block.\n\
             2. Line 7: Unused variable 'temp' → Remove or use the variable.\n",
            self.reason,
            self.language.unwrap_or("unknown"),
            self.model.unwrap_or("Gemini"),
        );
        if let Some(hint) = self.hint {
            text.push('\n');
            text.push_str(hint);
        }
        text
    }
}

/// Mock report used by the full backend.
pub fn build_mock_analysis(reason: &str, language: Option<&str>, model: Option<&str>) -> String {
    MockAnalysis::new(reason)
        .with_language(language)
        .with_model(model)
        .render()
}
