//! Whitespace trimming across fragment boundaries

use super::Converter;

/// Strips whitespace from the start and the end of the whole stream.
///
/// Leading whitespace is dropped until the first non-whitespace character of
/// the stream. Trailing whitespace of every fragment is held back as
/// undecided: the next fragment with non-whitespace releases it, the end of
/// the stream discards it.
#[derive(Debug, Default)]
pub struct TrimSpaces {
    leading_done: bool,
    undecided: String,
}

impl TrimSpaces {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Converter for TrimSpaces {
    fn name(&self) -> &'static str {
        "trim_spaces"
    }

    fn convert(&mut self, fragment: &str) -> String {
        let mut fragment = fragment;
        if !self.leading_done {
            fragment = fragment.trim_start();
            if fragment.is_empty() {
                return String::new();
            }
            self.leading_done = true;
        }

        let body_len = fragment.trim_end().len();
        if body_len == 0 {
            self.undecided.push_str(fragment);
            return String::new();
        }

        let mut out = std::mem::take(&mut self.undecided);
        out.push_str(&fragment[..body_len]);
        self.undecided.push_str(&fragment[body_len..]);
        out
    }

    fn release(&mut self) -> String {
        self.leading_done = true;
        std::mem::take(&mut self.undecided)
    }

    fn finish(&mut self) -> String {
        if !self.undecided.is_empty() {
            tracing::trace!(bytes = self.undecided.len(), "dropping trailing whitespace");
        }
        self.undecided.clear();
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(fragments: &[&str]) -> String {
        let mut trim = TrimSpaces::new();
        let mut out: String = fragments.iter().map(|f| trim.convert(f)).collect();
        out.push_str(&trim.finish());
        out
    }

    #[test]
    fn test_single_fragment() {
        assert_eq!(run(&["  hello world  "]), "hello world");
    }

    #[test]
    fn test_split_every_four_bytes() {
        assert_eq!(run(&["  he", "llo ", "worl", "d  "]), "hello world");
    }

    #[test]
    fn test_whitespace_only_fragment_between_words() {
        assert_eq!(run(&["a", "   ", "\t", "b"]), "a   \tb");
    }

    #[test]
    fn test_leading_trim_does_not_retrigger() {
        let mut trim = TrimSpaces::new();
        assert_eq!(trim.convert("  x"), "x");
        assert_eq!(trim.convert("  y"), "  y");
    }

    #[test]
    fn test_undecided_is_held() {
        let mut trim = TrimSpaces::new();
        assert_eq!(trim.convert("word \n"), "word");
        assert_eq!(trim.undecided, " \n");
        assert_eq!(trim.finish(), "");
        assert_eq!(trim.undecided, "");
    }

    #[test]
    fn test_release_ends_leading_trim() {
        let mut trim = TrimSpaces::new();
        assert_eq!(trim.convert("   "), "");
        assert_eq!(trim.release(), "");
        assert_eq!(trim.convert("  x  "), "  x");
        assert_eq!(trim.release(), "  ");
    }

    #[test]
    fn test_all_whitespace_stream() {
        assert_eq!(run(&[" ", "\n\t", "  "]), "");
    }

    #[test]
    fn test_unicode_whitespace() {
        assert_eq!(run(&["\u{3000}\u{a0}тест\u{2003}", "\u{2003}"]), "тест");
    }

    #[test]
    fn test_idempotent() {
        let once = run(&["  a  b ", " c  "]);
        assert_eq!(run(&[&once]), once);
    }
}
