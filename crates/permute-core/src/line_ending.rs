//! Line break handling.
//!
//! Documents keep LF line breaks only, because line offsets and the reconciler's inserted
//! `"\n"` separators assume one character per break. CRLF input is rewritten to LF when a
//! [`TextDocument`](crate::TextDocument) is built, and the permuted text is converted back
//! through [`LineEnding::apply_to_text`].

/// Line break written back out after a permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// [`LineEnding::Crlf`] as soon as `text` holds one `"\r\n"`, else [`LineEnding::Lf`].
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Rewrite the LF breaks of `text` with this ending.
    pub fn apply_to_text(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', "\r\n"),
        }
    }
}

/// Rewrite CRLF and lone CR line breaks as LF.
pub fn normalize_to_lf(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_prefers_crlf_when_present() {
        assert_eq!(LineEnding::detect_in_text("a\nb\r\nc"), LineEnding::Crlf);
        assert_eq!(LineEnding::detect_in_text("a\nb"), LineEnding::Lf);
        assert_eq!(LineEnding::detect_in_text(""), LineEnding::Lf);
    }

    #[test]
    fn test_normalize_handles_lone_cr() {
        assert_eq!(normalize_to_lf("a\r\nb\rc\n"), "a\nb\nc\n");
        assert_eq!(LineEnding::Crlf.apply_to_text("a\nb"), "a\r\nb");
    }
}
