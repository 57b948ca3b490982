//! Styled segments so status lines and titles reach the host as ordered, typed runs.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::color::Rgb;

const RESET: &str = "\x1b[0m";

/// Text attribute applied to a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Bold,
}

impl Attribute {
    fn sgr(self) -> &'static str {
        match self {
            Self::Bold => "\x1b[1m",
        }
    }
}

/// One styled run of text within a tab title or status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSegment {
    pub background: Rgb,
    pub foreground: Rgb,
    pub attributes: BTreeSet<Attribute>,
    pub text: String,
}

impl StyledSegment {
    #[must_use]
    pub fn new(background: Rgb, foreground: Rgb, text: impl Into<String>) -> Self {
        Self {
            background,
            foreground,
            attributes: BTreeSet::new(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.insert(attribute);
        self
    }

    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.attributes.contains(&Attribute::Bold)
    }
}

/// Ordered segments in left-to-right render order.
pub type StatusLine = Vec<StyledSegment>;

/// Concatenated text with styling dropped.
#[must_use]
pub fn plain_text(segments: &[StyledSegment]) -> String {
    segments.iter().map(|segment| segment.text.as_str()).collect()
}

/// Render segments as 24-bit ANSI escapes, resetting after each run.
#[must_use]
pub fn render_ansi(segments: &[StyledSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.text.is_empty() {
            continue;
        }
        out.push_str(&segment.background.to_bg_escape());
        out.push_str(&segment.foreground.to_fg_escape());
        for attribute in &segment.attributes {
            out.push_str(attribute.sgr());
        }
        out.push_str(&segment.text);
        out.push_str(RESET);
    }
    out
}
