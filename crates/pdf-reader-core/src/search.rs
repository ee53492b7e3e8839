//! Line-oriented text search with surrounding context.

use regex::RegexBuilder;

use crate::error::{QueryError, QueryResult};

/// Number of lines of context kept on each side of a matching line.
pub const CONTEXT_LINES: usize = 2;

/// Options controlling text search behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Whether the comparison is case-sensitive (default: `false`).
    pub case_sensitive: bool,
    /// Whether the query must match on word boundaries (default: `false`).
    ///
    /// The query is used verbatim as the source of a `\b<query>\b` pattern,
    /// so regex metacharacters in the query keep their regex meaning.
    pub whole_word: bool,
}

/// A single matching line and the excerpt around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Line number (1-indexed) in the searched text.
    pub line: usize,
    /// The matching line plus up to [`CONTEXT_LINES`] lines on either side,
    /// joined with `\n`.
    pub context: String,
}

enum LineMatcher {
    Substring { needle: String, case_sensitive: bool },
    Pattern(regex::Regex),
}

impl LineMatcher {
    fn new(query: &str, options: &SearchOptions) -> QueryResult<Self> {
        if options.whole_word {
            let re = RegexBuilder::new(&format!(r"(?-u:\b){query}(?-u:\b)"))
                .case_insensitive(!options.case_sensitive)
                .build()
                .map_err(|e| QueryError::Runtime(format!("invalid search pattern: {e}")))?;
            return Ok(LineMatcher::Pattern(re));
        }
        let needle = if options.case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };
        Ok(LineMatcher::Substring {
            needle,
            case_sensitive: options.case_sensitive,
        })
    }

    fn is_match(&self, line: &str) -> bool {
        match self {
            LineMatcher::Substring {
                needle,
                case_sensitive: true,
            } => line.contains(needle.as_str()),
            LineMatcher::Substring { needle, .. } => line.to_lowercase().contains(needle.as_str()),
            LineMatcher::Pattern(re) => re.is_match(line),
        }
    }
}

/// Search `text` line by line for `query`.
///
/// Lines are the `\n`-separated segments of `text`, numbered from 1. Every
/// matching line yields its own [`SearchMatch`], in line order, even when
/// its excerpt overlaps a neighbor's.
///
/// # Errors
///
/// Returns [`QueryError::Runtime`] when whole-word mode is on and the query
/// does not form a valid pattern.
pub fn search_lines(
    text: &str,
    query: &str,
    options: &SearchOptions,
) -> QueryResult<Vec<SearchMatch>> {
    let matcher = LineMatcher::new(query, options)?;
    let lines: Vec<&str> = text.split('\n').collect();

    let matches = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| matcher.is_match(line))
        .map(|(i, _)| {
            let start = i.saturating_sub(CONTEXT_LINES);
            let end = (i + CONTEXT_LINES + 1).min(lines.len());
            SearchMatch {
                line: i + 1,
                context: lines[start..end].join("\n"),
            }
        })
        .collect();

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(case_sensitive: bool, whole_word: bool) -> SearchOptions {
        SearchOptions {
            case_sensitive,
            whole_word,
        }
    }

    #[test]
    fn finds_every_matching_line() {
        let matches = search_lines("foo\nbar\nfoo", "foo", &SearchOptions::default()).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line, 1);
        assert_eq!(matches[1].line, 3);
        assert_eq!(matches[0].context, "foo\nbar\nfoo");
        assert_eq!(matches[1].context, "foo\nbar\nfoo");
    }

    #[test]
    fn context_window_is_two_lines_each_side() {
        let text = "l1\nl2\nl3\nl4\nHIT\nl6\nl7\nl8\nl9";
        let matches = search_lines(text, "hit", &SearchOptions::default()).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line, 5);
        assert_eq!(matches[0].context, "l3\nl4\nHIT\nl6\nl7");
    }

    #[test]
    fn context_clamped_at_document_edges() {
        let text = "hit first\na\nb\nc\nd\nhit last";
        let matches = search_lines(text, "hit", &SearchOptions::default()).unwrap();
        assert_eq!(matches[0].context, "hit first\na\nb");
        assert_eq!(matches[1].context, "c\nd\nhit last");
    }

    #[test]
    fn overlapping_excerpts_are_reported_separately() {
        let matches = search_lines("x\nhit\nhit\ny", "hit", &SearchOptions::default()).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line, 2);
        assert_eq!(matches[1].line, 3);
        assert_eq!(matches[0].context, "x\nhit\nhit\ny");
        assert_eq!(matches[1].context, "x\nhit\nhit\ny");
    }

    #[test]
    fn no_match_is_empty() {
        let matches = search_lines("alpha\nbeta", "gamma", &SearchOptions::default()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn substring_default_ignores_case() {
        let matches =
            search_lines("Artificial Intelligence", "INTELL", &SearchOptions::default()).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn case_sensitive_toggle() {
        assert!(search_lines("ai", "AI", &opts(true, false)).unwrap().is_empty());
        assert_eq!(search_lines("AI", "AI", &opts(true, false)).unwrap().len(), 1);
        assert_eq!(search_lines("ai", "AI", &opts(false, false)).unwrap().len(), 1);
    }

    #[test]
    fn whole_word_respects_boundaries() {
        assert!(search_lines("category", "cat", &opts(false, true)).unwrap().is_empty());
        assert_eq!(search_lines("the cat sat", "cat", &opts(false, true)).unwrap().len(), 1);
    }

    #[test]
    fn whole_word_boundaries_are_ascii() {
        // `é` is not an ASCII word character, so `caf` ends on a boundary.
        assert_eq!(search_lines("café au lait", "caf", &opts(false, true)).unwrap().len(), 1);
        assert!(search_lines("cafeteria", "caf", &opts(false, true)).unwrap().is_empty());
    }

    #[test]
    fn whole_word_case_toggle() {
        assert_eq!(search_lines("The CAT sat", "cat", &opts(false, true)).unwrap().len(), 1);
        assert!(search_lines("The CAT sat", "cat", &opts(true, true)).unwrap().is_empty());
    }

    #[test]
    fn whole_word_passes_pattern_through() {
        let matches = search_lines("cat\ncot\ncut\ncoat", "c.t", &opts(false, true)).unwrap();
        let lines: Vec<usize> = matches.iter().map(|m| m.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn substring_treats_metacharacters_literally() {
        assert!(search_lines("cat", "c.t", &SearchOptions::default()).unwrap().is_empty());
        assert_eq!(search_lines("a c.t", "c.t", &SearchOptions::default()).unwrap().len(), 1);
    }

    #[test]
    fn invalid_whole_word_pattern_is_runtime_error() {
        let err = search_lines("text", "(unclosed", &opts(false, true)).unwrap_err();
        assert_eq!(err.kind(), "RuntimeError");
    }

    #[test]
    fn line_numbers_follow_newline_split() {
        let matches =
            search_lines("a\n\nb\n\nneedle", "needle", &SearchOptions::default()).unwrap();
        assert_eq!(matches[0].line, 5);
    }
}
