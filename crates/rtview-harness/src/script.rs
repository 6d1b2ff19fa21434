//! Session scripts.
//!
//! One step per line; blank lines and lines starting with `#` are skipped.
//!
//! | Line | Step |
//! |------|------|
//! | `focus base` | move focus to a field |
//! | `tab` | focus the next field |
//! | `blur` | drop focus (commits the focused field) |
//! | `type 6.5` | type the rest of the line into the focused field |
//! | `backspace` | delete before the cursor |
//! | `clear` | empty the focused field |
//! | `set height 8` | mutate the model directly, bypassing the view |
//! | `expect hypotenuse 7.21` | fail unless the field shows this text (`""` for empty) |
//! | `show` | append a snapshot to the transcript |

use std::fmt;

use rtview_model::{Attribute, ParseAttributeError};

/// A displayed field that `expect` can check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    Field(Attribute),
    Hypotenuse,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(attribute) => write!(f, "{attribute}"),
            Self::Hypotenuse => f.write_str("hypotenuse"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Focus(Attribute),
    Tab,
    Blur,
    Type(String),
    Backspace,
    Clear,
    Set(Attribute, f64),
    Expect { target: Target, text: String },
    Show,
}

/// A parsed step with its 1-based source line.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: Step,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptErrorKind {
    UnknownCommand(String),
    MissingArgument(&'static str),
    BadAttribute(ParseAttributeError),
    BadNumber(String),
    ExpectationFailed {
        target: Target,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for ScriptErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(cmd) => write!(f, "unknown command '{cmd}'"),
            Self::MissingArgument(what) => write!(f, "missing {what}"),
            Self::BadAttribute(err) => write!(f, "{err}"),
            Self::BadNumber(text) => write!(f, "'{text}' is not a number"),
            Self::ExpectationFailed {
                target,
                expected,
                actual,
            } => write!(f, "expected {target} to show '{expected}', found '{actual}'"),
        }
    }
}

/// A script failure, located at its source line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptError {
    pub line: usize,
    pub kind: ScriptErrorKind,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ScriptError {}

/// Parse a whole script.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        if let Some(step) = parse_line(raw).map_err(|kind| ScriptError { line, kind })? {
            steps.push(ScriptLine { line, step });
        }
    }
    Ok(steps)
}

fn parse_line(raw: &str) -> Result<Option<Step>, ScriptErrorKind> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let (command, rest) = trimmed.split_once(' ').unwrap_or((trimmed.trim_end(), ""));

    let step = match command {
        "focus" => Step::Focus(attribute(rest)?),
        "tab" => Step::Tab,
        "blur" => Step::Blur,
        // Keep interior and trailing spaces: they are part of the typed text.
        "type" => Step::Type(rest.to_owned()),
        "backspace" => Step::Backspace,
        "clear" => Step::Clear,
        "set" => {
            let (name, value) = rest
                .trim()
                .split_once(' ')
                .ok_or(ScriptErrorKind::MissingArgument("value"))?;
            let value = value.trim();
            let value = value
                .parse()
                .map_err(|_| ScriptErrorKind::BadNumber(value.to_owned()))?;
            Step::Set(attribute(name)?, value)
        }
        "expect" => {
            let rest = rest.trim();
            let (name, text) = rest.split_once(' ').unwrap_or((rest, ""));
            let target = match name {
                "" => return Err(ScriptErrorKind::MissingArgument("field")),
                "hypotenuse" => Target::Hypotenuse,
                other => Target::Field(attribute(other)?),
            };
            let text = match text.trim() {
                "\"\"" => String::new(),
                other => other.to_owned(),
            };
            Step::Expect { target, text }
        }
        "show" => Step::Show,
        other => return Err(ScriptErrorKind::UnknownCommand(other.to_owned())),
    };
    Ok(Some(step))
}

fn attribute(text: &str) -> Result<Attribute, ScriptErrorKind> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ScriptErrorKind::MissingArgument("field"));
    }
    text.parse().map_err(ScriptErrorKind::BadAttribute)
}
