pub const MAX_NAME_LEN: usize = 15;

/// The player name as it is being typed.
#[derive(Clone, Debug, Default)]
pub struct NameBuffer {
    text: String,
}

impl NameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Appends `ch` if it is alphanumeric or a space and there is room left.
    pub fn push(&mut self, ch: char) -> bool {
        let allowed = ch.is_alphanumeric() || ch == ' ';
        if !allowed || self.text.chars().count() >= MAX_NAME_LEN {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// The trimmed name, or `None` if there is nothing but whitespace.
    pub fn submit(&self) -> Option<String> {
        validate(&self.text)
    }
}

/// Applies the same rules as typing `raw` in by hand.
pub fn validate(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let ok = !trimmed.is_empty()
        && trimmed.chars().count() <= MAX_NAME_LEN
        && trimmed.chars().all(|c| c.is_alphanumeric() || c == ' ');
    ok.then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> NameBuffer {
        let mut buf = NameBuffer::new();
        for ch in s.chars() {
            buf.push(ch);
        }
        buf
    }

    #[test]
    fn ignores_symbols() {
        let buf = typed("a-b_c!d 1");
        assert_eq!(buf.as_str(), "abcd 1");
    }

    #[test]
    fn caps_at_fifteen_chars() {
        let buf = typed("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(buf.as_str(), "abcdefghijklmno");
    }

    #[test]
    fn backspace_removes_last() {
        let mut buf = typed("Ann");
        buf.backspace();
        assert_eq!(buf.as_str(), "An");
        buf.backspace();
        buf.backspace();
        buf.backspace();
        assert_eq!(buf.as_str(), "");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(typed("").submit(), None);
        assert_eq!(typed("   ").submit(), None);
        assert_eq!(typed("  Bo ").submit(), Some("Bo".to_string()));
    }

    #[test]
    fn validate_matches_typing_rules() {
        assert_eq!(validate("Player 1"), Some("Player 1".to_string()));
        assert_eq!(validate("bad/name"), None);
        assert_eq!(validate("sixteen chars xx"), None);
    }
}
