//! Command domain model.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A program and its argument vector, ready to hand to a runner.
///
/// Arguments are kept as separate tokens from construction onward, so
/// nothing a caller passes in is ever re-split or re-quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Program name or path.
    pub program: String,
    /// Arguments, one token each.
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Build a command from an argv-style vector (program first).
    ///
    /// Returns `None` for an empty vector.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone()).args(args.iter().cloned()))
    }

    /// Split a command line into tokens once.
    ///
    /// Supports single quotes (literal), double quotes (backslash escapes
    /// `"`, `\`, `$` and `` ` ``), and backslash escapes outside quotes.
    /// No expansion of any kind is performed.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens = tokenize(input)?;
        Self::from_argv(&tokens).ok_or_else(|| Error::CommandParse {
            input: input.to_string(),
            reason: "empty command".to_string(),
        })
    }
}

/// A path as a single argument token.
///
/// Paths that are not valid UTF-8 are rejected rather than rewritten, so a
/// tool never receives a name that does not exist.
pub fn path_arg(path: &Path) -> Result<String> {
    path.to_str()
        .map(str::to_owned)
        .ok_or_else(|| Error::NonUtf8Path(path.to_path_buf()))
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(token: &str) -> String {
    let needs_quotes = token.is_empty()
        || token
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\' | '$' | '`'));
    if needs_quotes {
        format!("'{}'", token.replace('\'', r"'\''"))
    } else {
        token.to_string()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum State {
    Plain,
    Single,
    Double,
}

fn tokenize(input: &str) -> Result<Vec<String>> {
    let parse_error = |reason: &str| Error::CommandParse {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let mut tokens = Vec::new();
    let mut current = String::new();
    // Distinguishes `''` (an empty token) from no token at all.
    let mut in_token = false;
    let mut state = State::Plain;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match state {
            State::Plain => match c {
                '\'' => {
                    state = State::Single;
                    in_token = true;
                }
                '"' => {
                    state = State::Double;
                    in_token = true;
                }
                '\\' => {
                    let escaped = chars.next().ok_or_else(|| parse_error("trailing backslash"))?;
                    current.push(escaped);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
            State::Single => match c {
                '\'' => state = State::Plain,
                c => current.push(c),
            },
            State::Double => match c {
                '"' => state = State::Plain,
                '\\' => {
                    let next = chars
                        .next()
                        .ok_or_else(|| parse_error("unterminated double quote"))?;
                    if !matches!(next, '"' | '\\' | '$' | '`') {
                        current.push('\\');
                    }
                    current.push(next);
                }
                c => current.push(c),
            },
        }
    }

    match state {
        State::Single => return Err(parse_error("unterminated single quote")),
        State::Double => return Err(parse_error("unterminated double quote")),
        State::Plain => {}
    }

    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_words() {
        let cmd = CommandSpec::parse("grep -v  foo").unwrap();
        assert_eq!(cmd.program, "grep");
        assert_eq!(cmd.args, vec!["-v", "foo"]);
    }

    #[test]
    fn test_parse_quotes() {
        let cmd = CommandSpec::parse(r#"echo 'a b' "c \"d\"" e\ f ''"#).unwrap();
        assert_eq!(cmd.program, "echo");
        assert_eq!(cmd.args, vec!["a b", "c \"d\"", "e f", ""]);
    }

    #[test]
    fn test_parse_double_quote_keeps_unknown_escape() {
        let cmd = CommandSpec::parse(r#"printf "a\nb""#).unwrap();
        assert_eq!(cmd.args, vec![r"a\nb"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(CommandSpec::parse("").is_err());
        assert!(CommandSpec::parse("   ").is_err());
        assert!(CommandSpec::parse("echo 'open").is_err());
        assert!(CommandSpec::parse("echo \"open").is_err());
        assert!(CommandSpec::parse("echo \\").is_err());
    }

    #[test]
    fn test_from_argv() {
        assert!(CommandSpec::from_argv(&[]).is_none());

        let argv = vec!["ls".to_string(), "-l".to_string(), "my dir".to_string()];
        let cmd = CommandSpec::from_argv(&argv).unwrap();
        assert_eq!(cmd, CommandSpec::new("ls").arg("-l").arg("my dir"));
    }

    #[test]
    fn test_path_arg() {
        assert_eq!(path_arg(Path::new("dir/a b.tar")).unwrap(), "dir/a b.tar");
    }

    #[cfg(unix)]
    #[test]
    fn test_path_arg_rejects_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"caf\xe9.tar.gz"));
        let err = path_arg(path).unwrap_err();
        assert!(matches!(err, Error::NonUtf8Path(p) if p == path));
    }

    #[test]
    fn test_display_quotes_when_needed() {
        let cmd = CommandSpec::new("echo").args(["plain", "two words", "it's"]);
        assert_eq!(cmd.to_string(), r"echo plain 'two words' 'it'\''s'");
    }
}
