//! Line-preserving model of an RDP connection file
//!
//! The document keeps every line verbatim. Only the `selectedmonitors` and
//! `use multimon` directives are ever inspected or rewritten; everything else
//! round-trips untouched apart from line endings.

use std::collections::BTreeSet;
use std::fmt;

use crate::rdp::defaults::{
    self, SELECTED_MONITORS, USE_MULTIMON, multimon_enabled_directive,
    selected_monitors_directive,
};
use crate::rdp::directive::{Directive, DirectiveType};

/// Outcome of reading the monitor selection out of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionDirective {
    /// A `selectedmonitors` line exists; holds every index that parsed
    Found(BTreeSet<usize>),
    /// The document has no `selectedmonitors` line
    Missing,
}

/// What `merge_selection` changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// An existing selection line was rewritten in place at this line number
    Replaced { line: usize },
    /// A selection line was appended; `multimon` tells how multimon was enabled
    Appended { multimon: MultimonChange },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultimonChange {
    /// An existing `use multimon` line was forced to 1
    Forced { line: usize },
    /// No `use multimon` line existed, one was appended
    Appended,
}

/// Ordered lines of an RDP file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RdpDocument {
    lines: Vec<String>,
}

impl RdpDocument {
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Splits file contents into lines, accepting both `\n` and `\r\n`
    ///
    /// A leading byte-order mark is dropped so it cannot hide the first line.
    pub fn parse(contents: &str) -> Self {
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
        Self {
            lines: contents.lines().map(str::to_owned).collect(),
        }
    }

    /// Builds a complete default configuration selecting `indices`
    pub fn generate(indices: &[usize]) -> Self {
        Self {
            lines: defaults::default_directives(indices)
                .iter()
                .map(Directive::to_string)
                .collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Serializes the document with a newline after every line
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// First line holding a `key:<kind>:` directive, with its parsed form
    fn find_directive(&self, key: &str, kind: DirectiveType) -> Option<(usize, Directive)> {
        self.lines.iter().enumerate().find_map(|(position, line)| {
            Directive::parse(line)
                .filter(|directive| directive.key == key && directive.kind == kind)
                .map(|directive| (position, directive))
        })
    }

    /// Reads the monitor indices from the first `selectedmonitors:s:` line
    ///
    /// Tokens that do not parse as an index are skipped.
    pub fn parse_selection(&self) -> SelectionDirective {
        let Some((_, directive)) = self.find_directive(SELECTED_MONITORS, DirectiveType::String)
        else {
            return SelectionDirective::Missing;
        };

        let indices = directive
            .value
            .trim()
            .split(',')
            .filter_map(|token| match token.trim().parse::<usize>() {
                Ok(index) => Some(index),
                Err(_) => {
                    if !token.trim().is_empty() {
                        tracing::debug!("Skipping malformed monitor index {:?}", token);
                    }
                    None
                }
            })
            .collect();

        SelectionDirective::Found(indices)
    }

    /// Writes `indices` into the document as the monitor selection
    ///
    /// Rewrites the first existing selection line in place. Without one, the
    /// first `use multimon` line is forced to 1 (or appended) and a new
    /// selection line is appended after it. No other line is touched.
    pub fn merge_selection(&mut self, indices: &[usize]) -> MergeOutcome {
        let selection_line = selected_monitors_directive(indices).to_string();

        if let Some((position, _)) = self.find_directive(SELECTED_MONITORS, DirectiveType::String) {
            self.lines[position] = selection_line;
            return MergeOutcome::Replaced { line: position };
        }

        // An existing `selectedmonitors` line leaves `use multimon` alone,
        // even when it is set to 0.
        let multimon = match self.find_directive(USE_MULTIMON, DirectiveType::Integer) {
            Some((position, _)) => {
                self.lines[position] = multimon_enabled_directive().to_string();
                MultimonChange::Forced { line: position }
            }
            None => {
                self.lines.push(multimon_enabled_directive().to_string());
                MultimonChange::Appended
            }
        };
        self.lines.push(selection_line);

        MergeOutcome::Appended { multimon }
    }
}

impl fmt::Display for RdpDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> RdpDocument {
        RdpDocument::from_lines(lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn generate_then_parse_round_trips_selection() {
        let document = RdpDocument::generate(&[0, 2]);
        let reparsed = RdpDocument::parse(&document.to_text());

        assert_eq!(
            reparsed.parse_selection(),
            SelectionDirective::Found(BTreeSet::from([0, 2]))
        );
    }

    #[test]
    fn generated_text_has_trailing_newline_and_fixed_header() {
        let text = RdpDocument::generate(&[1]).to_text();
        assert!(text.starts_with("screen mode id:i:2\nuse multimon:i:1\nselectedmonitors:s:1\n"));
        assert!(text.ends_with("use redirection server name:i:0\n"));
    }

    #[test]
    fn malformed_tokens_are_skipped() {
        let document = doc(&["selectedmonitors:s:1,x,3"]);
        assert_eq!(
            document.parse_selection(),
            SelectionDirective::Found(BTreeSet::from([1, 3]))
        );
    }

    #[test]
    fn whitespace_and_negative_tokens() {
        let document = doc(&["selectedmonitors:s: 4 , -1,,2 "]);
        assert_eq!(
            document.parse_selection(),
            SelectionDirective::Found(BTreeSet::from([2, 4]))
        );
    }

    #[test]
    fn missing_directive_is_reported() {
        let document = doc(&["full address:s:host", "use multimon:i:1"]);
        assert_eq!(document.parse_selection(), SelectionDirective::Missing);
    }

    #[test]
    fn first_selection_line_wins_when_parsing() {
        let document = doc(&["selectedmonitors:s:0", "selectedmonitors:s:1,2"]);
        assert_eq!(
            document.parse_selection(),
            SelectionDirective::Found(BTreeSet::from([0]))
        );
    }

    #[test]
    fn parse_accepts_crlf_line_endings() {
        let document = RdpDocument::parse("full address:s:host\r\nselectedmonitors:s:0,1\r\n");
        assert_eq!(document.lines()[1], "selectedmonitors:s:0,1");
        assert_eq!(
            document.parse_selection(),
            SelectionDirective::Found(BTreeSet::from([0, 1]))
        );
    }

    #[test]
    fn merge_replaces_existing_line_only() {
        let original = doc(&[
            "full address:s:host.example",
            "use multimon:i:1",
            "selectedmonitors:s:1",
            "username:s:alice",
        ]);
        let mut merged = original.clone();

        let outcome = merged.merge_selection(&[0, 2]);

        assert_eq!(outcome, MergeOutcome::Replaced { line: 2 });
        assert_eq!(merged.lines().len(), original.lines().len());
        for (i, (before, after)) in original.lines().iter().zip(merged.lines()).enumerate() {
            if i == 2 {
                assert_eq!(after, "selectedmonitors:s:0,2");
            } else {
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn merge_replaces_only_first_of_duplicate_lines() {
        let mut document = doc(&["selectedmonitors:s:0", "selectedmonitors:s:1"]);
        document.merge_selection(&[3]);
        assert_eq!(document.lines(), &["selectedmonitors:s:3", "selectedmonitors:s:1"]);
    }

    #[test]
    fn merge_appends_multimon_then_selection() {
        let mut document = doc(&["full address:s:host.example", "username:s:alice"]);

        let outcome = document.merge_selection(&[1, 2]);

        assert_eq!(
            outcome,
            MergeOutcome::Appended {
                multimon: MultimonChange::Appended
            }
        );
        assert_eq!(
            document.lines(),
            &[
                "full address:s:host.example",
                "username:s:alice",
                "use multimon:i:1",
                "selectedmonitors:s:1,2",
            ]
        );
    }

    #[test]
    fn merge_forces_existing_multimon_in_place() {
        let mut document = doc(&["use multimon:i:0", "full address:s:host"]);

        let outcome = document.merge_selection(&[0]);

        assert_eq!(
            outcome,
            MergeOutcome::Appended {
                multimon: MultimonChange::Forced { line: 0 }
            }
        );
        assert_eq!(
            document.lines(),
            &["use multimon:i:1", "full address:s:host", "selectedmonitors:s:0"]
        );
    }

    #[test]
    fn merge_leaves_disabled_multimon_when_selection_exists() {
        let mut document = doc(&["use multimon:i:0", "selectedmonitors:s:0"]);
        document.merge_selection(&[1]);
        assert_eq!(document.lines(), &["use multimon:i:0", "selectedmonitors:s:1"]);
    }

    #[test]
    fn merge_into_empty_document() {
        let mut document = RdpDocument::default();
        document.merge_selection(&[0]);
        assert_eq!(document.to_text(), "use multimon:i:1\nselectedmonitors:s:0\n");
    }

    #[test]
    fn byte_order_mark_is_dropped_from_first_line() {
        let mut document = RdpDocument::parse("\u{feff}selectedmonitors:s:0\nfull address:s:host\n");
        assert_eq!(document.lines()[0], "selectedmonitors:s:0");

        assert_eq!(document.merge_selection(&[1]), MergeOutcome::Replaced { line: 0 });
        assert_eq!(document.lines(), &["selectedmonitors:s:1", "full address:s:host"]);
    }

    #[test]
    fn selection_needs_exact_key_and_string_type() {
        let document = doc(&[
            "password 51:b:01000000d08c9ddf",
            "selectedmonitors:b:0100",
            "selectedmonitorsx:s:1",
            " selectedmonitors:s:2",
        ]);
        assert_eq!(document.parse_selection(), SelectionDirective::Missing);

        let mut merged = document.clone();
        merged.merge_selection(&[0]);
        assert_eq!(&merged.lines()[..4], document.lines());
        assert_eq!(merged.lines().len(), 6);
    }
}
