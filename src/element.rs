//! Display elements built from a parsed template.
//!
//! Every placeholder becomes exactly one control, seeded with the value at
//! its position. Literal runs become labels, split into rows at line-break
//! markers. [`extract`] walks the elements in order and yields one value per
//! control, which is the value list of the sentence.

use chrono::NaiveDateTime;
use chrono::format::{Parsed, StrftimeItems};
use regex::Regex;
use tracing::{debug, warn};

use crate::completion::EnumResolver;
use crate::error::{Result, SentenceError};
use crate::placeholder::{Placeholder, chrono_format, split_value};
use crate::render::{Choice, ElementView, Surface};
use crate::template::{Template, has_line_break, split_lines};

/// What became of an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    /// The edit was reverted; the message is meant for the user.
    Rejected { message: String },
    /// Read-only editors drop edits.
    Ignored,
}

impl EditOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

pub fn not_valid_message(value: &str) -> String {
    format!("The value {value} is not valid for this field")
}

// ------------- Text field -------------
#[derive(Debug, Clone)]
pub struct TextField {
    slot: usize,
    text: String,
    last_accepted: String,
    pattern: String,
    restriction: Option<Regex>,
    visible_length: usize,
}

impl TextField {
    pub fn new(slot: usize, value: &str, pattern: &str) -> Result<Self> {
        let restriction = if pattern.is_empty() {
            None
        } else {
            // whole text has to match, as opposed to a search
            let anchored = format!("^(?:{pattern})$");
            Some(Regex::new(&anchored).map_err(|e| SentenceError::Pattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?)
        };
        Ok(Self {
            slot,
            text: value.to_string(),
            last_accepted: value.to_string(),
            pattern: pattern.to_string(),
            restriction,
            visible_length: value.chars().count() + 1,
        })
    }
    pub fn slot(&self) -> usize {
        self.slot
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
    pub fn visible_length(&self) -> usize {
        self.visible_length
    }
    fn matches(&self, text: &str) -> bool {
        self.restriction.as_ref().is_none_or(|r| r.is_match(text))
    }
    pub fn is_valid(&self) -> bool {
        self.matches(&self.text)
    }
    pub fn set_text(&mut self, text: &str) -> EditOutcome {
        if !self.matches(text) {
            warn!(slot = self.slot, value = text, pattern = %self.pattern, "rejected text");
            self.text = self.last_accepted.clone();
            return EditOutcome::Rejected { message: not_valid_message(text) };
        }
        self.text = text.to_string();
        self.last_accepted = self.text.clone();
        EditOutcome::Accepted
    }
    pub fn value(&self) -> String {
        self.text.trim().to_string()
    }
}

// ------------- Drop down -------------
#[derive(Debug, Clone)]
pub struct Dropdown {
    slot: usize,
    tag: String,
    fact_type: String,
    field: String,
    choices: Vec<Choice>,
    selected: Option<usize>,
    seed: String,
}

impl Dropdown {
    pub fn new(slot: usize, tag: &str, fact_type: &str, field: &str, value: &str, resolver: &dyn EnumResolver) -> Self {
        let mut choices = Vec::new();
        let mut selected = None;
        match resolver.enum_values(fact_type, field) {
            Some(candidates) => {
                for (i, candidate) in candidates.iter().enumerate() {
                    let (stored, display) = split_value(candidate);
                    if stored == value {
                        selected = Some(i);
                    }
                    choices.push(Choice { value: stored.to_string(), display: display.to_string() });
                }
            }
            None => debug!(fact_type, field, "no enumeration found"),
        }
        Self {
            slot,
            tag: tag.to_string(),
            fact_type: fact_type.to_string(),
            field: field.to_string(),
            choices,
            selected,
            seed: value.to_string(),
        }
    }
    pub fn slot(&self) -> usize {
        self.slot
    }
    pub fn tag(&self) -> &str {
        &self.tag
    }
    pub fn fact_type(&self) -> &str {
        &self.fact_type
    }
    pub fn field(&self) -> &str {
        &self.field
    }
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }
    pub fn selected(&self) -> Option<&Choice> {
        self.selected.and_then(|i| self.choices.get(i))
    }
    pub fn select(&mut self, stored: &str) -> EditOutcome {
        match self.choices.iter().position(|c| c.value == stored) {
            Some(i) => {
                self.selected = Some(i);
                EditOutcome::Accepted
            }
            None => {
                warn!(slot = self.slot, value = stored, "not a candidate");
                EditOutcome::Rejected { message: not_valid_message(stored) }
            }
        }
    }
    /// The selected stored value; with nothing selected the seeded value is kept.
    pub fn value(&self) -> String {
        self.selected().map(|c| c.value.clone()).unwrap_or_else(|| self.seed.clone())
    }
}

// ------------- Toggle -------------
#[derive(Debug, Clone)]
pub struct Toggle {
    slot: usize,
    initial: String,
    checked: bool,
}

impl Toggle {
    pub fn new(slot: usize, initial: &str, value: &str) -> Self {
        Self { slot, initial: initial.to_string(), checked: value.eq_ignore_ascii_case("true") }
    }
    pub fn slot(&self) -> usize {
        self.slot
    }
    pub fn initial(&self) -> &str {
        &self.initial
    }
    pub fn checked(&self) -> bool {
        self.checked
    }
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
    pub fn value(&self) -> String {
        let value = if self.checked { "true" } else { "false" };
        value.to_string()
    }
}

// ------------- Date control -------------
#[derive(Debug, Clone)]
pub struct DateControl {
    slot: usize,
    format: String,
    strftime: String,
    text: String,
}

impl DateControl {
    pub fn new(slot: usize, format: &str, value: &str) -> Self {
        Self { slot, format: format.to_string(), strftime: chrono_format(format), text: value.to_string() }
    }
    pub fn slot(&self) -> usize {
        self.slot
    }
    /// The configured pattern, as written in the definition.
    pub fn format(&self) -> &str {
        &self.format
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let mut parsed = Parsed::new();
        chrono::format::parse(&mut parsed, text, StrftimeItems::new(&self.strftime)).ok()?;
        // fields the pattern leaves out: midnight, first day, first month, then 1970.
        // A setter fails without effect when the field was parsed already.
        let fills: [fn(&mut Parsed); 4] = [
            |p| {
                let _ = p.set_hour(0);
                let _ = p.set_minute(0);
            },
            |p| {
                let _ = p.set_day(1);
            },
            |p| {
                let _ = p.set_month(1);
            },
            |p| {
                let _ = p.set_year(1970);
            },
        ];
        let mut resolved = parsed.to_naive_datetime_with_offset(0).ok();
        for fill in fills {
            if resolved.is_some() {
                break;
            }
            fill(&mut parsed);
            resolved = parsed.to_naive_datetime_with_offset(0).ok();
        }
        resolved
    }
    /// The current date, when the current text is a date in the configured format.
    pub fn date(&self) -> Option<NaiveDateTime> {
        self.parse(&self.text)
    }
    pub fn set_date(&mut self, date: NaiveDateTime) {
        self.text = date.format(&self.strftime).to_string();
    }
    pub fn set_text(&mut self, text: &str) -> EditOutcome {
        if self.parse(text).is_none() {
            warn!(slot = self.slot, value = text, format = %self.format, "rejected date");
            return EditOutcome::Rejected { message: not_valid_message(text) };
        }
        self.text = text.to_string();
        EditOutcome::Accepted
    }
    pub fn value(&self) -> String {
        self.text.clone()
    }
}

// ------------- Element -------------
#[derive(Debug, Clone)]
pub enum Element {
    Label(String),
    LineBreak,
    TextField(TextField),
    Dropdown(Dropdown),
    Toggle(Toggle),
    DateControl(DateControl),
}

impl Element {
    fn control(slot: usize, placeholder: Placeholder, value: &str, resolver: &dyn EnumResolver) -> Result<Self> {
        Ok(match placeholder {
            Placeholder::Enum { tag, fact_type, field } => {
                Self::Dropdown(Dropdown::new(slot, &tag, &fact_type, &field, value, resolver))
            }
            Placeholder::Date { format } => Self::DateControl(DateControl::new(slot, &format, value)),
            Placeholder::Boolean { initial } => Self::Toggle(Toggle::new(slot, &initial, value)),
            Placeholder::Text { pattern } => Self::TextField(TextField::new(slot, value, &pattern)?),
            Placeholder::FreeText => Self::TextField(TextField::new(slot, value, "")?),
        })
    }
    /// The placeholder position of a control; labels and line breaks have none.
    pub fn slot(&self) -> Option<usize> {
        match self {
            Self::Label(_) | Self::LineBreak => None,
            Self::TextField(e) => Some(e.slot()),
            Self::Dropdown(e) => Some(e.slot()),
            Self::Toggle(e) => Some(e.slot()),
            Self::DateControl(e) => Some(e.slot()),
        }
    }
    pub fn value(&self) -> Option<String> {
        match self {
            Self::Label(_) | Self::LineBreak => None,
            Self::TextField(e) => Some(e.value()),
            Self::Dropdown(e) => Some(e.value()),
            Self::Toggle(e) => Some(e.value()),
            Self::DateControl(e) => Some(e.value()),
        }
    }
    pub fn render(&self, surface: &mut dyn Surface, interactive: bool) {
        let view = match self {
            Self::LineBreak => {
                surface.new_row();
                return;
            }
            Self::Label(text) => ElementView::Label { text: text.clone() },
            Self::TextField(e) => ElementView::TextField {
                slot: e.slot,
                text: e.text.clone(),
                visible_length: e.visible_length,
                pattern: e.pattern.clone(),
                interactive,
            },
            Self::Dropdown(e) => ElementView::Dropdown {
                slot: e.slot(),
                fact_type: e.fact_type().to_string(),
                field: e.field().to_string(),
                choices: e.choices.clone(),
                selected: e.selected,
                interactive,
            },
            Self::Toggle(e) => ElementView::Toggle { slot: e.slot, checked: e.checked, interactive },
            Self::DateControl(e) => ElementView::DateControl {
                slot: e.slot,
                text: e.text.clone(),
                format: e.format.clone(),
                interactive,
            },
        };
        surface.place(view);
    }
}

/// Builds the elements of a parsed template, consuming one value per placeholder.
pub fn build_elements(template: &Template, values: &[String], resolver: &dyn EnumResolver) -> Result<Vec<Element>> {
    let mut elements = vec![Element::Label(template.leading_text().to_string())];
    for (slot, (inner, trailing)) in template.runs().into_iter().enumerate() {
        let value = values
            .get(slot)
            .ok_or(SentenceError::MissingValue { index: slot, available: values.len() })?;
        let placeholder = Placeholder::classify(inner)?;
        debug!(slot, kind = placeholder.kind(), "placeholder");
        elements.push(Element::control(slot, placeholder, value, resolver)?);
        if has_line_break(trailing) {
            for (i, line) in split_lines(trailing).into_iter().enumerate() {
                if i > 0 {
                    elements.push(Element::LineBreak);
                }
                elements.push(Element::Label(line.to_string()));
            }
        } else {
            elements.push(Element::Label(trailing.to_string()));
        }
    }
    Ok(elements)
}

/// Parses a definition and builds its elements in one go.
pub fn parse(definition: &str, values: &[String], resolver: &dyn EnumResolver) -> Result<Vec<Element>> {
    build_elements(&Template::parse(definition)?, values, resolver)
}

/// One value per control, in element order.
pub fn extract(elements: &[Element]) -> Vec<String> {
    elements.iter().filter_map(Element::value).collect()
}
