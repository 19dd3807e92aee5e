//! Text conversions applied to the decoded stream
//!
//! Converters see the text as a sequence of fragments, in order, and may keep
//! state between calls. [`ConverterChain`] runs them in a fixed order.

mod case;
mod trim;

pub use case::{LowerCase, UpperCase};
pub use trim::TrimSpaces;

use std::fmt;

use clap::ValueEnum;

use crate::errors::{Result, StreamconvError};

/// A stateful text transformer
pub trait Converter: fmt::Debug {
    /// Name as accepted by `--conv`
    fn name(&self) -> &'static str;

    /// Transform the next fragment of the stream
    fn convert(&mut self, fragment: &str) -> String;

    /// The text is interrupted by bytes that bypass the chain (undecodable
    /// input). Returns held-back text, which can no longer be at the edge of
    /// the stream.
    fn release(&mut self) -> String {
        String::new()
    }

    /// Called once after the last fragment; returns any text still held back
    fn finish(&mut self) -> String {
        String::new()
    }
}

/// Conversion names accepted on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum ConversionKind {
    /// Map every character to upper case
    #[value(name = "upper_case")]
    UpperCase,
    /// Map every character to lower case
    #[value(name = "lower_case")]
    LowerCase,
    /// Strip leading and trailing whitespace of the whole stream
    #[value(name = "trim_spaces")]
    TrimSpaces,
}

impl ConversionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionKind::UpperCase => "upper_case",
            ConversionKind::LowerCase => "lower_case",
            ConversionKind::TrimSpaces => "trim_spaces",
        }
    }

    fn build(self) -> Box<dyn Converter> {
        match self {
            ConversionKind::UpperCase => Box::new(UpperCase),
            ConversionKind::LowerCase => Box::new(LowerCase),
            ConversionKind::TrimSpaces => Box::new(TrimSpaces::new()),
        }
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered sequence of converters
#[derive(Debug, Default)]
pub struct ConverterChain {
    converters: Vec<Box<dyn Converter>>,
}

impl ConverterChain {
    /// Chain that passes text through unchanged
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from the selected conversions.
    ///
    /// Converters run in the order they were first named; repeats are
    /// collapsed. Selecting both case foldings is an error.
    pub fn from_kinds(kinds: &[ConversionKind]) -> Result<Self> {
        let mut selected: Vec<ConversionKind> = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            let conflict = match kind {
                ConversionKind::UpperCase => Some(ConversionKind::LowerCase),
                ConversionKind::LowerCase => Some(ConversionKind::UpperCase),
                ConversionKind::TrimSpaces => None,
            };
            if let Some(other) = conflict.filter(|other| selected.contains(other)) {
                return Err(StreamconvError::config(format!(
                    "illegal flag: {} and {} at the same time",
                    kind, other
                )));
            }
            if !selected.contains(&kind) {
                selected.push(kind);
            }
        }

        Ok(Self {
            converters: selected.into_iter().map(ConversionKind::build).collect(),
        })
    }

    /// Names in application order
    pub fn names(&self) -> Vec<&'static str> {
        self.converters.iter().map(|c| c.name()).collect()
    }

    /// Run a fragment through every converter in order
    pub fn convert(&mut self, fragment: &str) -> String {
        let mut text = fragment.to_owned();
        for converter in &mut self.converters {
            if text.is_empty() {
                break;
            }
            text = converter.convert(&text);
        }
        text
    }

    /// Collect held-back text before undecodable bytes are written
    pub fn release(&mut self) -> String {
        self.drain(|converter| converter.release())
    }

    /// Flush every converter at end of stream
    pub fn finish(&mut self) -> String {
        self.drain(|converter| converter.finish())
    }

    /// Text released by one converter still goes through the ones after it.
    fn drain(&mut self, mut step: impl FnMut(&mut dyn Converter) -> String) -> String {
        let mut carried = String::new();
        for converter in &mut self.converters {
            let mut out = if carried.is_empty() {
                String::new()
            } else {
                converter.convert(&carried)
            };
            out.push_str(&step(converter.as_mut()));
            carried = out;
        }
        carried
    }
}
