//! DSL sentence – editing of rule sentences written against a domain specific language.
//!
//! A DSL sentence couples a *definition* with the *values* filling its
//! placeholders, e.g. the definition
//! `"There is a person aged {age:[0-9]+} with gender {g:ENUM:Person.gender}"`
//! and the values `["42", "F"]`. Placeholders are delimited by `{` and `}`,
//! everything outside them is literal text.
//!
//! ## Modules
//! * [`template`] – Parses definitions (grammar in `template.pest`) into literal runs and placeholders.
//! * [`placeholder`] – Classifies placeholder text into enum, date, boolean, constrained or free text.
//! * [`element`] – Labels, line breaks and controls built from a template, plus value extraction.
//! * [`completion`] – The [`completion::EnumResolver`] seam supplying drop down candidates.
//! * [`sentence`] – [`sentence::DslSentence`] and the [`sentence::SentenceEditor`] keeping it in sync.
//! * [`render`] – Rendering surfaces; [`render::RowLayout`] lays elements out in rows.
//! * [`settings`] – Service settings read with the `config` crate.
//! * [`server`] – A small JSON service rendering and editing sentences.
//!
//! ## Placeholders
//! * `{name}` – free text
//! * `{name:<regex>}` – text that has to match the regex in full; the syntax
//!   is that of the `regex` crate, so look-around and backreferences are not
//!   available
//! * `{name:ENUM:<Type>.<field>}` – a drop down; candidates `stored=display` or plain
//! * `{name:DATE:<format>}` – a date, with a Java style pattern such as `dd-MMM-yyyy`
//! * `{name:BOOLEAN:<initial>}` – true or false
//!
//! Values are positional; the leading name inside a placeholder is ignored.
//! The two characters `\n` in literal text after a placeholder start a new
//! row; a real newline is kept as label text.
//!
//! ## Quick Start
//! ```
//! use dsl_sentence::completion::NoEnumerations;
//! use dsl_sentence::sentence::{DslSentence, SentenceEditor};
//! let sentence = DslSentence::new("Age is {age:[0-9]+}", vec!["42".to_string()]).shared();
//! let mut editor = SentenceEditor::new(&sentence, &NoEnumerations).unwrap();
//! assert!(editor.set_text(0, "43").unwrap().is_accepted());
//! assert!(!editor.set_text(0, "old").unwrap().is_accepted());
//! assert_eq!(sentence.borrow().values(), ["43"]);
//! ```

pub mod completion;
pub mod element;
pub mod error;
pub mod placeholder;
pub mod render;
pub mod sentence;
pub mod server;
pub mod settings;
pub mod template;
