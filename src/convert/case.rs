//! Case folding converters
//!
//! Both map one character at a time without looking at its neighbours, so the
//! result never depends on where fragment boundaries fall.

use super::Converter;

/// Upper-case every character
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperCase;

impl Converter for UpperCase {
    fn name(&self) -> &'static str {
        "upper_case"
    }

    fn convert(&mut self, fragment: &str) -> String {
        fragment.chars().flat_map(char::to_uppercase).collect()
    }
}

/// Lower-case every character
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCase;

impl Converter for LowerCase {
    fn name(&self) -> &'static str {
        "lower_case"
    }

    fn convert(&mut self, fragment: &str) -> String {
        fragment.chars().flat_map(char::to_lowercase).collect()
    }
}
