use serde::Serialize;

/// One line of a grouped notification body: `"{name}{count suffix}: {latest content}"`.
///
/// The first `highlight_len` bytes of `text` are the conversation name,
/// which the renderer shows in bold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLine {
    pub name: String,
    pub highlight_len: usize,
    pub text: String,
}

impl PreviewLine {
    pub fn new(name: &str, count_suffix: &str, latest_content: &str) -> Self {
        Self {
            name: name.to_string(),
            highlight_len: name.len(),
            text: format!("{}{}: {}", name, count_suffix, latest_content),
        }
    }

    /// The emphasised prefix of `text`
    pub fn highlighted(&self) -> &str {
        self.text.get(..self.highlight_len).unwrap_or_default()
    }
}

/// Everything the renderer needs for one notification group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSummary {
    pub total: usize,
    pub names: Vec<String>,
    pub lines: Vec<PreviewLine>,
}

impl NotificationSummary {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_line_format() {
        let line = PreviewLine::new("Alice", " (2)", "there");
        assert_eq!(line.text, "Alice (2): there");
        assert_eq!(line.highlight_len, 5);
        assert_eq!(line.highlighted(), "Alice");
    }

    #[test]
    fn test_highlight_len_is_byte_length() {
        let line = PreviewLine::new("Zoë", "", "salut");
        assert_eq!(line.highlight_len, "Zoë".len());
        assert_eq!(line.highlighted(), "Zoë");
        assert_eq!(line.text, "Zoë: salut");
    }
}
