//! The sentence and its editor.
//!
//! A [`DslSentence`] owns a definition and the values of its placeholders.
//! A [`SentenceEditor`] builds elements for it and, after every accepted
//! edit, extracts all values again and replaces the sentence's list. The
//! editor only holds a weak reference to the sentence.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::completion::EnumResolver;
use crate::element::{EditOutcome, Element, build_elements, extract};
use crate::error::{Result, SentenceError};
use crate::render::Surface;
use crate::template::Template;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DslSentence {
    definition: String,
    #[serde(default)]
    values: Vec<String>,
}

impl DslSentence {
    pub fn new(definition: &str, values: Vec<String>) -> Self {
        Self { definition: definition.to_string(), values }
    }
    pub fn definition(&self) -> &str {
        &self.definition
    }
    pub fn values(&self) -> &[String] {
        &self.values
    }
    pub fn set_values(&mut self, values: Vec<String>) {
        self.values = values;
    }
    /// Shares the sentence with an editor.
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }
}

type Listener = Box<dyn FnMut(&[String])>;

pub struct SentenceEditor {
    sentence: Weak<RefCell<DslSentence>>,
    template: Template,
    elements: Vec<Element>,
    // element index per slot
    slots: Vec<usize>,
    values: Vec<String>,
    read_only: bool,
    dirty: bool,
    listeners: Vec<Listener>,
}

impl SentenceEditor {
    pub fn new(sentence: &Rc<RefCell<DslSentence>>, resolver: &dyn EnumResolver) -> Result<Self> {
        Self::with_read_only(sentence, resolver, false)
    }
    pub fn with_read_only(sentence: &Rc<RefCell<DslSentence>>, resolver: &dyn EnumResolver, read_only: bool) -> Result<Self> {
        let (template, elements) = {
            let s = sentence.borrow();
            let template = Template::parse(s.definition())?;
            let elements = build_elements(&template, s.values(), resolver)?;
            let expected = template.placeholder_count();
            if s.values().len() > expected {
                warn!(supplied = s.values().len(), expected, "dropping surplus values");
            }
            (template, elements)
        };
        let slots = elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.slot().map(|_| i))
            .collect();
        let values = extract(&elements);
        // normalize the seeded values without marking anything as modified
        sentence.borrow_mut().set_values(values.clone());
        debug!(definition = template.definition(), elements = elements.len(), read_only, "editor built");
        Ok(Self {
            sentence: Rc::downgrade(sentence),
            template,
            elements,
            slots,
            values,
            read_only,
            dirty: false,
            listeners: Vec::new(),
        })
    }
    pub fn template(&self) -> &Template {
        &self.template
    }
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
    /// The value list as of the last extraction.
    pub fn values(&self) -> &[String] {
        &self.values
    }
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
    /// Every regex-constrained text field currently matches its pattern.
    pub fn is_valid(&self) -> bool {
        self.elements.iter().all(|e| match e {
            Element::TextField(field) => field.is_valid(),
            _ => true,
        })
    }
    /// Registers a listener called with the new values after each accepted edit.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&[String]) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }
    pub fn render(&self, surface: &mut dyn Surface) {
        for element in &self.elements {
            element.render(surface, !self.read_only);
        }
    }

    fn element_mut(&mut self, slot: usize) -> Result<&mut Element> {
        let index = *self
            .slots
            .get(slot)
            .ok_or_else(|| SentenceError::Edit(format!("no placeholder at slot {slot} (have {})", self.slots.len())))?;
        Ok(&mut self.elements[index])
    }

    fn mismatch(slot: usize, wanted: &str) -> SentenceError {
        SentenceError::Edit(format!("placeholder at slot {slot} is not a {wanted}"))
    }

    /// Runs an edit against one element, then extracts and notifies when it was accepted.
    fn edit<F>(&mut self, slot: usize, apply: F) -> Result<EditOutcome>
    where
        F: FnOnce(&mut Element) -> Result<EditOutcome>,
    {
        if self.read_only {
            // still complain about slots that do not exist
            self.element_mut(slot)?;
            debug!(slot, "read-only, edit ignored");
            return Ok(EditOutcome::Ignored);
        }
        let outcome = apply(self.element_mut(slot)?)?;
        if outcome.is_accepted() {
            self.update_sentence();
            self.dirty = true;
            for listener in self.listeners.iter_mut() {
                listener(self.values.as_slice());
            }
        }
        Ok(outcome)
    }

    fn update_sentence(&mut self) {
        self.values = extract(&self.elements);
        match self.sentence.upgrade() {
            Some(sentence) => sentence.borrow_mut().set_values(self.values.clone()),
            None => debug!("sentence is gone, values kept in the editor only"),
        }
    }

    pub fn set_text(&mut self, slot: usize, text: &str) -> Result<EditOutcome> {
        self.edit(slot, |e| match e {
            Element::TextField(field) => Ok(field.set_text(text)),
            Element::DateControl(date) => Ok(date.set_text(text)),
            _ => Err(Self::mismatch(slot, "text field")),
        })
    }
    pub fn select(&mut self, slot: usize, stored: &str) -> Result<EditOutcome> {
        self.edit(slot, |e| match e {
            Element::Dropdown(dropdown) => Ok(dropdown.select(stored)),
            _ => Err(Self::mismatch(slot, "drop down")),
        })
    }
    pub fn set_checked(&mut self, slot: usize, checked: bool) -> Result<EditOutcome> {
        self.edit(slot, |e| match e {
            Element::Toggle(toggle) => {
                toggle.set_checked(checked);
                Ok(EditOutcome::Accepted)
            }
            _ => Err(Self::mismatch(slot, "toggle")),
        })
    }
    pub fn set_date(&mut self, slot: usize, date: NaiveDateTime) -> Result<EditOutcome> {
        self.edit(slot, |e| match e {
            Element::DateControl(control) => {
                control.set_date(date);
                Ok(EditOutcome::Accepted)
            }
            _ => Err(Self::mismatch(slot, "date")),
        })
    }
    pub fn set_date_text(&mut self, slot: usize, text: &str) -> Result<EditOutcome> {
        self.edit(slot, |e| match e {
            Element::DateControl(control) => Ok(control.set_text(text)),
            _ => Err(Self::mismatch(slot, "date")),
        })
    }
}
