//! Parsing of sentence definitions into literal runs and placeholder spans.
//!
//! The grammar lives in `template.pest`. A definition such as
//! `"There is a person aged {age:[0-9]+}\nnamed {name}"` parses into the
//! segments `Literal("There is a person aged ")`, `Placeholder("age:[0-9]+")`,
//! `Literal("\nnamed ")`, `Placeholder("name")`.

use pest::Parser;
use pest::error::LineColLocation;
use pest_derive::Parser;
use regex::Regex;
use tracing::debug;

use crate::error::{Result, SentenceError};

#[derive(Parser)]
#[grammar = "template.pest"]
struct TemplateParser;

lazy_static::lazy_static! {
    // the two characters `\` `n`; a real newline stays in the label
    static ref LINE_BREAK: Regex = Regex::new(r"\\n").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    definition: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(definition: &str) -> Result<Self> {
        let mut pairs = TemplateParser::parse(Rule::template, definition).map_err(|e| {
            let (line, col) = match e.line_col {
                LineColLocation::Pos((l, c)) => (l, c),
                LineColLocation::Span((l, c), _) => (l, c),
            };
            SentenceError::Parse {
                message: format!("unbalanced braces in '{definition}': a '{{' has no closing '}}' (line {line}, column {col})"),
                line: Some(line),
                col: Some(col),
            }
        })?;
        let mut segments = Vec::new();
        if let Some(template) = pairs.next() {
            for pair in template.into_inner() {
                match pair.as_rule() {
                    Rule::literal => segments.push(Segment::Literal(pair.as_str().to_string())),
                    Rule::placeholder => {
                        let inner = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                        segments.push(Segment::Placeholder(inner.to_string()));
                    }
                    _ => (),
                }
            }
        }
        debug!(definition, segments = segments.len(), "parsed template");
        Ok(Self { definition: definition.to_string(), segments })
    }
    pub fn definition(&self) -> &str {
        &self.definition
    }
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(inner) => Some(inner.as_str()),
            Segment::Literal(_) => None,
        })
    }
    pub fn placeholder_count(&self) -> usize {
        self.placeholders().count()
    }
    /// Text before the first placeholder, or the whole definition when there is none.
    pub fn leading_text(&self) -> &str {
        match self.segments.first() {
            Some(Segment::Literal(text)) => text,
            _ => "",
        }
    }
    /// Each placeholder paired with the literal run that follows it (possibly empty).
    pub fn runs(&self) -> Vec<(&str, &str)> {
        let mut runs = Vec::new();
        let mut iter = self.segments.iter().peekable();
        while let Some(segment) = iter.next() {
            if let Segment::Placeholder(inner) = segment {
                let trailing = match iter.peek() {
                    Some(Segment::Literal(text)) => text.as_str(),
                    _ => "",
                };
                runs.push((inner.as_str(), trailing));
            }
        }
        runs
    }
}

pub fn has_line_break(run: &str) -> bool {
    LINE_BREAK.is_match(run)
}

/// Splits a literal run on line-break markers; a run without markers yields itself.
pub fn split_lines(run: &str) -> Vec<&str> {
    LINE_BREAK.split(run).collect()
}
