//! Edit constraints for the text field.
//!
//! Constraints decide which characters may enter the buffer and how long it may grow.

/// Lowest and highest character the field can hold (printable single-byte range).
pub const FIRST_PRINTABLE: char = ' ';
pub const LAST_PRINTABLE: char = '~';

/// Check if a character is in the printable single-byte range
#[inline]
pub fn is_printable(ch: char) -> bool {
    (FIRST_PRINTABLE..=LAST_PRINTABLE).contains(&ch)
}

/// Per-character validation and transformation.
///
/// Case-forcing runs first, then the deny-list, then the allow-list (if any).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharFilter {
    /// Uppercase every character before checking the lists
    pub force_caps: bool,

    /// Characters that may be typed (None = all printable characters)
    pub allowed: Option<String>,

    /// Characters that may never be typed
    pub forbidden: Option<String>,
}

impl CharFilter {
    pub fn new(force_caps: bool) -> Self {
        Self {
            force_caps,
            allowed: None,
            forbidden: None,
        }
    }

    /// Restrict input to the given characters. An empty set disables the allow-list.
    pub fn with_allowed(mut self, allowed: Option<&str>) -> Self {
        self.allowed = allowed.filter(|s| !s.is_empty()).map(str::to_string);
        self
    }

    /// Reject the given characters. An empty set disables the deny-list.
    pub fn with_forbidden(mut self, forbidden: Option<&str>) -> Self {
        self.forbidden = forbidden.filter(|s| !s.is_empty()).map(str::to_string);
        self
    }

    /// Run a raw character through the filter.
    ///
    /// Returns the (possibly uppercased) character, or `None` if it is rejected.
    pub fn classify(&self, raw: char) -> Option<char> {
        if !is_printable(raw) {
            return None;
        }

        let ch = if self.force_caps {
            raw.to_ascii_uppercase()
        } else {
            raw
        };

        if let Some(forbidden) = &self.forbidden {
            if forbidden.contains(ch) {
                return None;
            }
        }

        if let Some(allowed) = &self.allowed {
            if !allowed.contains(ch) {
                return None;
            }
        }

        Some(ch)
    }

    /// Every printable character that survives the filter, in code order
    pub fn accepted_chars(&self) -> impl Iterator<Item = char> + '_ {
        (FIRST_PRINTABLE..=LAST_PRINTABLE).filter_map(|c| self.classify(c))
    }
}

/// Constraints that limit what the field accepts.
#[derive(Debug, Clone, Default)]
pub struct EditConstraints {
    /// Maximum length in characters (None = unlimited)
    pub max_length: Option<usize>,

    /// Character filter applied to typed and programmatically set text
    pub filter: CharFilter,
}

impl EditConstraints {
    /// Check if inserting text would exceed max length
    pub fn would_exceed_max_length(&self, current_len: usize, insert_len: usize) -> bool {
        if let Some(max) = self.max_length {
            current_len + insert_len > max
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_accepts_printable() {
        let f = CharFilter::default();
        assert_eq!(f.classify('a'), Some('a'));
        assert_eq!(f.classify(' '), Some(' '));
        assert_eq!(f.classify('~'), Some('~'));
    }

    #[test]
    fn test_rejects_control_and_multibyte() {
        let f = CharFilter::default();
        assert_eq!(f.classify('\0'), None);
        assert_eq!(f.classify('\n'), None);
        assert_eq!(f.classify('\u{7f}'), None);
        assert_eq!(f.classify('é'), None);
    }

    #[test]
    fn test_force_caps() {
        let f = CharFilter::new(true);
        assert_eq!(f.classify('a'), Some('A'));
        assert_eq!(f.classify('Z'), Some('Z'));
        assert_eq!(f.classify('1'), Some('1'));
    }

    #[test]
    fn test_forbidden_checked_after_caps() {
        let f = CharFilter::new(true).with_forbidden(Some("Q"));
        assert_eq!(f.classify('q'), None);
        assert_eq!(f.classify('Q'), None);
        assert_eq!(f.classify('r'), Some('R'));
    }

    #[test]
    fn test_forbidden_wins_over_allowed() {
        let f = CharFilter::default()
            .with_allowed(Some("abc"))
            .with_forbidden(Some("b"));
        assert_eq!(f.classify('a'), Some('a'));
        assert_eq!(f.classify('b'), None);
        assert_eq!(f.classify('d'), None);
    }

    #[test]
    fn test_empty_lists_are_disabled() {
        let f = CharFilter::default()
            .with_allowed(Some(""))
            .with_forbidden(Some(""));
        assert_eq!(f.allowed, None);
        assert_eq!(f.forbidden, None);
        assert_eq!(f.classify('x'), Some('x'));
    }

    #[test]
    fn test_accepted_chars() {
        let f = CharFilter::new(true).with_allowed(Some("AB"));
        let accepted: String = f.accepted_chars().collect();
        // 'A' and 'B' come from themselves and from 'a'/'b' via case-forcing
        assert_eq!(accepted, "ABAB");
    }

    #[test]
    fn test_max_length() {
        let mut c = EditConstraints::default();
        assert!(!c.would_exceed_max_length(1000, 1));
        c.max_length = Some(5);
        assert!(!c.would_exceed_max_length(4, 1));
        assert!(c.would_exceed_max_length(5, 1));
    }
}
