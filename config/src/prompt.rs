//! Reading operator answers from a token stream.
//!
//! A token is one line of input with surrounding whitespace removed. A blank
//! line or the end of the stream both mean "no answer", which ends repeated
//! reads and selects defaults.

use crate::error::ConfigError;
use crate::volume::{Volume, flatten_volumes, unflatten_volumes};
use std::io::{self, BufRead, Write};

/// A sequential source of answer tokens.
pub trait TokenSource {
    /// The next token, or `None` on a blank line or at end of input.
    fn next_token(&mut self) -> io::Result<Option<String>>;
}

/// Line oriented tokens from any buffered reader.
pub struct LineTokens<R> {
    reader: R,
}

impl<R: BufRead> LineTokens<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> TokenSource for LineTokens<R> {
    fn next_token(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let token = line.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token.to_string()))
    }
}

/// An input that is always at end of stream.
pub struct NoInput;

impl TokenSource for NoInput {
    fn next_token(&mut self) -> io::Result<Option<String>> {
        Ok(None)
    }
}

/// A scalar that can be typed in answer to a prompt.
pub trait PromptValue: Sized + Clone {
    /// `None` when the token is not a valid `Self`.
    fn parse_token(token: &str) -> Option<Self>;
}

impl PromptValue for String {
    fn parse_token(token: &str) -> Option<Self> {
        Some(token.to_string())
    }
}

impl PromptValue for u16 {
    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl PromptValue for bool {
    fn parse_token(token: &str) -> Option<Self> {
        Some(token.to_lowercase().starts_with('y'))
    }
}

/// A list element read as a fixed-size group of scalars.
pub trait GroupItem: Sized + Clone {
    type Scalar: PromptValue;

    fn flatten(items: &[Self]) -> Vec<Self::Scalar>;
    fn unflatten(scalars: Vec<Self::Scalar>) -> Vec<Self>;
}

impl GroupItem for String {
    type Scalar = String;

    fn flatten(items: &[Self]) -> Vec<String> {
        items.to_vec()
    }

    fn unflatten(scalars: Vec<String>) -> Vec<Self> {
        scalars
    }
}

impl GroupItem for Volume {
    type Scalar = String;

    fn flatten(items: &[Self]) -> Vec<String> {
        flatten_volumes(items)
    }

    fn unflatten(scalars: Vec<String>) -> Vec<Self> {
        unflatten_volumes(scalars)
    }
}

pub struct Prompter {
    input: Box<dyn TokenSource>,
    output: Box<dyn Write>,
}

impl Prompter {
    pub fn new(input: Box<dyn TokenSource>, output: Box<dyn Write>) -> Self {
        Self { input, output }
    }

    /// Reads answers from stdin and prints prompts to stdout.
    pub fn stdio() -> Self {
        Self::new(
            Box::new(LineTokens::new(io::stdin().lock())),
            Box::new(io::stdout()),
        )
    }

    /// A prompter that never yields an answer and discards its output.
    pub fn silent() -> Self {
        Self::new(Box::new(NoInput), Box::new(io::sink()))
    }

    pub fn say(&mut self, text: &str) -> Result<(), ConfigError> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn read<V: PromptValue>(&mut self) -> Result<Option<V>, ConfigError> {
        let Some(token) = self.input.next_token()? else {
            return Ok(None);
        };
        let value = V::parse_token(&token);
        if value.is_none() {
            tracing::warn!("Ignoring unparsable answer {:?}", token);
        }
        Ok(value)
    }

    /// Prints `prompt` and reads a single value.
    pub fn read_scalar<V: PromptValue>(&mut self, prompt: &str) -> Result<Option<V>, ConfigError> {
        self.say(prompt)?;
        self.read()
    }

    /// Prints `prompt` on its own line, then reads values in groups of
    /// `sub_prompts.len()` (or one at a time when there are no sub-prompts)
    /// until an empty answer.
    ///
    /// Before read `i` the sub-prompt `sub_prompts[i % len]` is printed with
    /// `{}` replaced by `i`. A group left incomplete at the end is dropped.
    /// When no complete group was read, `default` is returned.
    pub fn read_group<V: PromptValue>(
        &mut self,
        prompt: &str,
        sub_prompts: &[&str],
        default: Vec<V>,
    ) -> Result<Vec<V>, ConfigError> {
        let group_size = sub_prompts.len().max(1);

        self.say(&format!("{}\n", prompt))?;

        let mut values: Vec<V> = Vec::new();
        let mut group: Vec<V> = Vec::with_capacity(group_size);
        for i in 0.. {
            if !sub_prompts.is_empty() {
                let sub_prompt = sub_prompts[i % sub_prompts.len()];
                self.say(&sub_prompt.replace("{}", &i.to_string()))?;
            }

            let Some(value) = self.read::<V>()? else {
                break;
            };
            group.push(value);

            if group.len() == group_size {
                values.append(&mut group);
            }
        }

        if !group.is_empty() {
            tracing::debug!("Discarding incomplete group of {} value(s)", group.len());
        }

        if values.is_empty() {
            return Ok(default);
        }
        Ok(values)
    }
}
