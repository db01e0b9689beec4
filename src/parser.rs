// parser.rs

use crate::config::MAX_LINE;

/// One tokenized input line. `args[0]` is the program name when present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub args: Vec<String>,
    pub background: bool,
}

impl ParsedCommand {
    pub fn foreground<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { args: args.into_iter().map(Into::into).collect(), background: false }
    }

    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Splits a raw input line on spaces and tabs. An `&` anywhere marks the
/// command as background and separates tokens. A trailing line terminator is
/// dropped, as is input past `MAX_LINE` characters; any other byte stays
/// inside its token.
pub fn parse_line(line: &str) -> ParsedCommand {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    let line = truncate(line, MAX_LINE);
    let mut parsed = ParsedCommand::default();
    let mut cur = String::new();
    for ch in line.chars() {
        match ch {
            ' ' | '\t' => flush(&mut cur, &mut parsed.args),
            '&' => {
                parsed.background = true;
                flush(&mut cur, &mut parsed.args);
            }
            _ => cur.push(ch),
        }
    }
    flush(&mut cur, &mut parsed.args);
    parsed
}

/// Whitespace split used when re-running a stored history entry.
pub fn split_entry(entry: &str) -> Vec<String> {
    entry.split_whitespace().map(str::to_string).collect()
}

fn flush(cur: &mut String, args: &mut Vec<String>) {
    if !cur.is_empty() {
        args.push(std::mem::take(cur));
    }
}

fn truncate(line: &str, max_chars: usize) -> &str {
    match line.char_indices().nth(max_chars) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_on_spaces_and_tabs() {
        let parsed = parse_line("ls \t -la   /tmp\n");
        assert_eq!(parsed.args, vec!["ls", "-la", "/tmp"]);
        assert!(!parsed.background);
        assert_eq!(parsed.program(), Some("ls"));
    }

    #[test]
    fn only_a_trailing_terminator_is_dropped() {
        assert_eq!(parse_line("ls -l\r\n").args, vec!["ls", "-l"]);
        assert_eq!(parse_line("ls\r-l").args, vec!["ls\r-l"]);
        assert_eq!(parse_line("a\u{b}b c").args, vec!["a\u{b}b", "c"]);
    }

    #[test]
    fn ampersand_sets_background_and_is_dropped() {
        let parsed = parse_line("ls -la &");
        assert_eq!(parsed.args, vec!["ls", "-la"]);
        assert!(parsed.background);
    }

    #[test]
    fn ampersand_inside_word_splits_it() {
        let parsed = parse_line("sleep&5");
        assert_eq!(parsed.args, vec!["sleep", "5"]);
        assert!(parsed.background);
    }

    #[test]
    fn whitespace_and_ampersand_only() {
        let parsed = parse_line("  \t & ");
        assert!(parsed.is_empty());
        assert!(parsed.background);
        assert_eq!(parsed.program(), None);
    }

    #[test]
    fn empty_line_has_no_tokens() {
        assert_eq!(parse_line(""), ParsedCommand::default());
        assert_eq!(parse_line("\n"), ParsedCommand::default());
    }

    #[test]
    fn long_lines_are_truncated() {
        let long = format!("echo {}", "x".repeat(200));
        let parsed = parse_line(&long);
        assert_eq!(parsed.args.len(), 2);
        assert_eq!(parsed.args[1].len(), MAX_LINE - "echo ".len());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let line = "é".repeat(MAX_LINE + 5);
        let parsed = parse_line(&line);
        assert_eq!(parsed.args[0].chars().count(), MAX_LINE);
    }

    #[test]
    fn split_entry_uses_any_whitespace() {
        assert_eq!(split_entry(" ls\t-l \n"), vec!["ls", "-l"]);
        assert!(split_entry("").is_empty());
    }

    proptest! {
        #[test]
        fn tokens_never_contain_separators(line in "[a-z &\t]{0,120}") {
            let parsed = parse_line(&line);
            prop_assert_eq!(parsed.background, line.chars().take(MAX_LINE).any(|c| c == '&'));
            for arg in &parsed.args {
                prop_assert!(!arg.is_empty());
                prop_assert!(!arg.contains(|c| c == ' ' || c == '\t' || c == '&'));
            }
        }
    }
}
