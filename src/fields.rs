//! Section configuration from named form fields
//!
//! Each section is described by a flat set of named string fields, the way
//! an HTML form would submit them. Parsing is forgiving: missing or
//! unparseable numbers become zero, and unknown choices fall back to the
//! form's first option. Only sections that cannot be played at all are
//! rejected, with a warning.

use std::{collections::HashMap, str::FromStr};

use crate::{
    gen::Waveform,
    generator::Generator,
    section::{FilterSettings, FrequencySpec, MovementMode, SectionConfig, Spread},
};

/// The fields of one section, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionFields {
    id: String,
    values: HashMap<String, String>,
}

impl SectionFields {
    /// Create an empty set of fields for section `id`
    pub fn new(id: impl Into<String>) -> Self {
        SectionFields {
            id: id.into(),
            values: HashMap::new(),
        }
    }
    /// Create a new section's fields filled with the form's initial values
    pub fn with_defaults(id: impl Into<String>) -> Self {
        [
            ("startType", "range"),
            ("startChordSelect", ""),
            ("startMinFreq", "220"),
            ("startMaxFreq", "440"),
            ("endType", "range"),
            ("endChordSelect", ""),
            ("endMinFreq", "440"),
            ("endMaxFreq", "880"),
            ("numVoices", "5"),
            ("oscType", "sine"),
            ("movementType", "direct"),
            ("startSpread", "even"),
            ("sectionLength", "5"),
            ("highpassFreq", "60"),
            ("lowpassFreq", "7000"),
            ("reverbAmount", "0.3"),
        ]
        .into_iter()
        .fold(SectionFields::new(id), |fields, (name, value)| {
            fields.with(name, value)
        })
    }
    /// Set a field
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }
    /// Set a field
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
    /// Remove a field
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }
    /// Get the section id
    pub fn id(&self) -> &str {
        &self.id
    }
    /// Get a field's value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
    fn number(&self, name: &str) -> f64 {
        self.get(name)
            .and_then(|value| leading(value, |c| c.is_ascii_digit() || "+-.eE".contains(c)))
            .unwrap_or(0.0)
    }
    fn count(&self, name: &str) -> usize {
        self.get(name)
            .and_then(|value| leading(value, |c| c.is_ascii_digit() || c == '+'))
            .unwrap_or(0)
    }
    fn spec(&self, kind: &str, chord: &str, min: &str, max: &str) -> FrequencySpec {
        match kind {
            "chord" => FrequencySpec::chord(self.get(chord).unwrap_or_default()),
            _ => FrequencySpec::range(self.number(min), self.number(max)),
        }
    }
    /// Parse the fields into a section
    ///
    /// Returns [`None`], after logging a warning, if the start type is
    /// missing or the section has no length or no voices.
    pub fn parse(&self) -> Option<SectionConfig> {
        let Some(start_type) = self.get("startType") else {
            log::warn!("Missing startType field for section: {}", self.id);
            return None;
        };
        let end_type = self.get("endType").unwrap_or("range");
        let config = SectionConfig {
            start: self.spec(start_type, "startChordSelect", "startMinFreq", "startMaxFreq"),
            start_spread: match self.get("startSpread") {
                Some("random") => Spread::Random,
                _ => Spread::Even,
            },
            end: self.spec(end_type, "endChordSelect", "endMinFreq", "endMaxFreq"),
            voices: self.count("numVoices"),
            waveform: self
                .get("oscType")
                .and_then(|name| name.parse().ok())
                .unwrap_or(Waveform::Sine),
            movement: match self.get("movementType") {
                Some("random") => MovementMode::Random,
                _ => MovementMode::Direct,
            },
            duration: self.number("sectionLength"),
            eq: FilterSettings {
                highpass: self.number("highpassFreq"),
                lowpass: self.number("lowpassFreq"),
                reverb: self.number("reverbAmount"),
            },
        };
        if !config.is_complete() {
            log::warn!("Incomplete configuration for section: {}", self.id);
            return None;
        }
        Some(config)
    }
}

/// Parse the longest prefix of `value` made of `accept`ed characters
///
/// Trailing text is ignored, so `"5 voices"` reads as 5.
fn leading<T: FromStr>(value: &str, accept: impl Fn(char) -> bool) -> Option<T> {
    let value = value.trim_start();
    let end = value.find(|c: char| !accept(c)).unwrap_or(value.len());
    (1..=end).rev().find_map(|len| value[..len].parse().ok())
}

/// Build a generator from every section that parses
///
/// Sections that fail to parse are skipped.
pub fn generator_from_fields<'a, I>(sections: I) -> Generator
where
    I: IntoIterator<Item = &'a SectionFields>,
{
    let mut generator = Generator::new();
    generator.extend(sections.into_iter().filter_map(SectionFields::parse));
    if generator.sections().is_empty() {
        log::warn!("No custom sound sections found.");
    }
    generator
}
