#![forbid(unsafe_code)]

use crate::model::{NewTag, TagType};
use crate::timeline::parse_date_tag;
use time::Date;

const MAX_CUSTOM_TAG_CHARS: usize = 64;

const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "english"),
    ("ja", "japanese"),
    ("it", "italian"),
    ("zh", "chinese"),
];

/// Canonical lowercase English name for a known source-language code.
pub fn language_name(code: &str) -> Option<&'static str> {
    let code = code.trim().to_ascii_lowercase();
    LANGUAGE_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, name)| *name)
}

/// Auto tags for a word added on `date`: day, month and year date tags, then
/// the language tag when the source language is known.
pub fn generate_auto_tags(source_language: &str, date: Date) -> Vec<NewTag> {
    let year = date.year();
    let month = u8::from(date.month());
    let day = date.day();

    let mut tags = vec![
        NewTag::new(format!("{year}-{month:02}-{day:02}"), TagType::AutoDate),
        NewTag::new(format!("{year}-{month:02}"), TagType::AutoDate),
        NewTag::new(year.to_string(), TagType::AutoDate),
    ];

    if let Some(name) = language_name(source_language) {
        tags.push(NewTag::new(name, TagType::AutoLanguage));
    }

    tags
}

pub fn normalize_custom_tag(raw: &str) -> Result<String, CustomTagError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CustomTagError::Empty);
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(CustomTagError::ContainsControl);
    }
    if trimmed.chars().count() > MAX_CUSTOM_TAG_CHARS {
        return Err(CustomTagError::TooLong);
    }
    // Date-shaped names belong to the timeline.
    if parse_date_tag(trimmed).is_some() {
        return Err(CustomTagError::LooksLikeDate);
    }
    Ok(trimmed.to_lowercase())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustomTagError {
    Empty,
    ContainsControl,
    TooLong,
    LooksLikeDate,
}

impl CustomTagError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "tag must not be empty",
            Self::ContainsControl => "tag contains control characters",
            Self::TooLong => "tag is longer than 64 characters",
            Self::LooksLikeDate => "tag must not look like a date tag",
        }
    }
}
