//! Matcher compilation and the match descriptor

use regex::Regex;

/// Descriptor of one successful match against a snapshot.
///
/// Offsets index into the snapshot the matcher was applied to. `spans[0]`
/// is always the whole match; the remaining entries follow capture-group
/// declaration order, with `None` for optional groups that did not
/// participate.
#[derive(Debug, Clone)]
pub struct Match {
    /// Start offset of the whole match.
    pub start: usize,
    /// End offset of the whole match (exclusive).
    pub end: usize,
    /// Whole-match span followed by every capture-group span.
    pub spans: Vec<Option<(usize, usize)>>,
}

impl Match {
    /// Slice the snapshot at every span, in order.
    ///
    /// Index 0 is the whole match. An unparticipating group yields an empty
    /// string rather than failing.
    pub fn groups<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.spans
            .iter()
            .map(|span| span.map_or("", |(start, end)| &text[start..end]))
            .collect()
    }
}

/// A compiled body-plus-prompt expression.
///
/// Built by [`Session::regex_matcher`](crate::Session::regex_matcher) and
/// [`Session::str_matcher`](crate::Session::str_matcher); compilation
/// happens once per construction, not once per evaluation.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Combine a body pattern with a prompt pattern and compile.
    pub(crate) fn compile(body: &str, prompt: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("(?msU)({body})(^{prompt}$)"))?;
        Ok(Self { regex })
    }

    /// Evaluate against a snapshot of accumulated text.
    ///
    /// Pure with respect to the snapshot: no buffering state is touched.
    pub fn find(&self, text: &str) -> Option<Match> {
        let caps = self.regex.captures(text)?;
        let whole = caps.get(0)?;
        let spans = caps
            .iter()
            .map(|group| group.map(|m| (m.start(), m.end())))
            .collect();
        Some(Match {
            start: whole.start(),
            end: whole.end(),
            spans,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::RETRIEVE_BODY;

    #[test]
    fn test_retrieve_matcher_basic() {
        let matcher = Matcher::compile(RETRIEVE_BODY, "[^\n]+#").unwrap();
        let m = matcher.find("test\nrouter#").unwrap();

        assert_eq!(m.start, 0);
        assert_eq!(m.end, 12);
        assert_eq!(m.groups("test\nrouter#"), vec!["test\nrouter#", "test\n", "router#"]);
    }

    #[test]
    fn test_body_stops_at_first_prompt_line() {
        let matcher = Matcher::compile(RETRIEVE_BODY, "[^\n]+#").unwrap();
        let text = "test\nrouter#\nrouter#";
        let m = matcher.find(text).unwrap();

        // Non-greedy body ends right before the first prompt line
        assert_eq!(&text[m.start..m.end], "test\nrouter#");
    }

    #[test]
    fn test_prompt_sub_captures() {
        let matcher = Matcher::compile("test.+", r"(\w+)([#>])").unwrap();
        let text = "test\nrouter#";
        let m = matcher.find(text).unwrap();

        assert_eq!(
            m.groups(text),
            vec!["test\nrouter#", "test\n", "router#", "router", "#"]
        );
    }

    #[test]
    fn test_unmatched_optional_group_is_empty() {
        let matcher = Matcher::compile("a(b)?c.+", "[^\n]+#").unwrap();
        let text = "ac\nhost#";
        let m = matcher.find(text).unwrap();

        let groups = m.groups(text);
        assert_eq!(groups[0], "ac\nhost#");
        assert_eq!(groups[2], "");
        assert_eq!(m.spans[2], None);
    }

    #[test]
    fn test_no_match_without_prompt() {
        let matcher = Matcher::compile(RETRIEVE_BODY, r"\S+#").unwrap();
        assert!(matcher.find("output with no prompt yet").is_none());
    }

    #[test]
    fn test_body_cannot_be_blank() {
        let matcher = Matcher::compile(RETRIEVE_BODY, r"\S+#").unwrap();
        // A lone prompt has no preceding body text to consume
        assert!(matcher.find("router#").is_none());
    }

    #[test]
    fn test_prompt_anchored_to_whole_line() {
        let matcher = Matcher::compile(RETRIEVE_BODY, "router#").unwrap();
        // The prompt line carries a trailing suffix, so `$` cannot anchor
        assert!(matcher.find("test\nrouter# extra").is_none());
        assert!(matcher.find("test\nrouter#").is_some());
    }

    #[test]
    fn test_invalid_body_pattern() {
        assert!(Matcher::compile("[invalid(", "[^\n]+").is_err());
    }
}
