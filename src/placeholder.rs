//! Placeholder descriptors.
//!
//! The inner text of a placeholder span uses `:`-separated fields:
//! * `<name>:ENUM:<Type>.<field>` – a drop down of candidate values
//! * `<name>:DATE:<format>` – a date, rendered with a Java style pattern
//! * `<name>:BOOLEAN:<initial>` – a true/false choice
//! * `<name>:<regex>` – free text that must fully match the regex
//! * `<name>` – free text
//!
//! The leading name is no longer used; values are positional.

use regex::Regex;

use crate::error::{Result, SentenceError};

pub const ENUM_TAG: &str = "ENUM";
pub const DATE_TAG: &str = "DATE";
pub const BOOLEAN_TAG: &str = "BOOLEAN";

lazy_static::lazy_static! {
    // <name>:<TAG>:<Type>.<field> with a tag we do not know by name
    static ref TAGGED_LOOKUP: Regex =
        Regex::new(r"^[^:]*:([A-Z][A-Z0-9_]*):([A-Za-z_][A-Za-z0-9_$]*)\.([A-Za-z_][A-Za-z0-9_]*)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Enum { tag: String, fact_type: String, field: String },
    Date { format: String },
    Boolean { initial: String },
    Text { pattern: String },
    FreeText,
}

fn tagged(tag: &str) -> String {
    format!(":{tag}:")
}

fn suffix_after<'a>(inner: &'a str, tag: &str) -> &'a str {
    inner.split(tagged(tag).as_str()).nth(1).unwrap_or("")
}

fn split_fact_field(inner: &str, fact_and_field: &str) -> Result<(String, String)> {
    match fact_and_field.split_once('.') {
        Some((fact_type, field)) if !fact_type.is_empty() && !field.is_empty() => {
            Ok((fact_type.to_string(), field.to_string()))
        }
        _ => Err(SentenceError::MalformedPlaceholder {
            placeholder: inner.to_string(),
            reason: format!("expected <Type>.<field> after the tag, found '{fact_and_field}'"),
        }),
    }
}

impl Placeholder {
    /// Classifies the inner text of a placeholder span. Known tags take
    /// precedence over the single colon rule, whatever else the text holds.
    pub fn classify(inner: &str) -> Result<Self> {
        if !inner.contains(':') {
            return Ok(Self::FreeText);
        }
        if inner.contains(&tagged(ENUM_TAG)) {
            // Type.field is whatever follows the last colon
            let fact_and_field = inner.rsplit_once(':').map(|(_, f)| f).unwrap_or("");
            let (fact_type, field) = split_fact_field(inner, fact_and_field)?;
            return Ok(Self::Enum { tag: ENUM_TAG.to_string(), fact_type, field });
        }
        if inner.contains(&tagged(DATE_TAG)) {
            let format = suffix_after(inner, DATE_TAG);
            if format.is_empty() {
                return Err(SentenceError::MalformedPlaceholder {
                    placeholder: inner.to_string(),
                    reason: "date placeholder without a format".to_string(),
                });
            }
            return Ok(Self::Date { format: format.to_string() });
        }
        if inner.contains(&tagged(BOOLEAN_TAG)) {
            return Ok(Self::Boolean { initial: suffix_after(inner, BOOLEAN_TAG).to_string() });
        }
        if let Some(captures) = TAGGED_LOOKUP.captures(inner) {
            return Ok(Self::Enum {
                tag: captures[1].to_string(),
                fact_type: captures[2].to_string(),
                field: captures[3].to_string(),
            });
        }
        let pattern = inner.split_once(':').map(|(_, p)| p).unwrap_or("");
        Ok(Self::Text { pattern: pattern.to_string() })
    }
    pub fn pattern(&self) -> &str {
        match self {
            Self::Text { pattern } => pattern,
            _ => "",
        }
    }
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Enum { .. } => "enum",
            Self::Date { .. } => "date",
            Self::Boolean { .. } => "boolean",
            Self::Text { .. } | Self::FreeText => "text",
        }
    }
}

/// Splits an enum candidate of the form `stored=display` at the first `=`,
/// keeping surrounding spaces. A candidate without `=` is both stored and
/// displayed as is.
pub fn split_value(candidate: &str) -> (&str, &str) {
    candidate.split_once('=').unwrap_or((candidate, candidate))
}

/// Translates a Java style date pattern (`dd-MMM-yyyy`) into a chrono format
/// string (`%d-%b-%Y`). Text in single quotes is literal, `''` is a quote.
pub fn chrono_format(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) != Some(&'\'') {
                        break;
                    }
                    i += 1;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }
        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }
        let spec = match (c, run) {
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M', 1) => "%-m",
            ('M', 2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', 1) => "%-d",
            ('d', _) => "%d",
            ('H', 1) => "%-H",
            ('H', _) => "%H",
            ('h', 1) => "%-I",
            ('h', _) => "%I",
            ('m', 1) => "%-M",
            ('m', _) => "%M",
            ('s', 1) => "%-S",
            ('s', _) => "%S",
            ('a', _) => "%p",
            ('E', 1..=3) => "%a",
            ('E', _) => "%A",
            _ => "",
        };
        if spec.is_empty() {
            for _ in 0..run {
                push_literal(&mut out, c);
            }
        } else {
            out.push_str(spec);
        }
        i += run;
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
