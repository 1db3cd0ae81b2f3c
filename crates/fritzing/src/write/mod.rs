//! quick-xml event writers for the two document families.
//!
//! Serialization is the mirror of the readers in [`crate::parse`]: an absent
//! (`None`) field produces no attribute or element at all, while a present
//! falsy value (`""`, `false`, `0`) is emitted. Boolean attributes use the
//! per-field `"1"`/`"0"` or `"true"`/`"false"` encoding the format expects.

pub(crate) mod part;
pub(crate) mod sketch;

pub(crate) use crate::{FritzingError, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesText, Event};
pub(crate) use quick_xml::events::BytesStart;
use std::io::Cursor;

pub(crate) struct Emitter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl Emitter {
    pub(crate) fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
        }
    }

    pub(crate) fn decl(&mut self) -> Result<()> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    pub(crate) fn event(&mut self, event: Event) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| FritzingError::Write(e.to_string()))
    }

    pub(crate) fn start(&mut self, el: BytesStart) -> Result<()> {
        self.event(Event::Start(el))
    }

    pub(crate) fn empty(&mut self, el: BytesStart) -> Result<()> {
        self.event(Event::Empty(el))
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    pub(crate) fn text(&mut self, text: &str) -> Result<()> {
        self.event(Event::Text(BytesText::new(text)))
    }

    /// `<name>value</name>`. The text event is written even when empty so
    /// an empty-but-present value stays inline and re-parses as present.
    pub(crate) fn text_element(&mut self, name: &str, value: &str) -> Result<()> {
        self.start(BytesStart::new(name))?;
        self.text(value)?;
        self.end(name)
    }

    pub(crate) fn opt_text_element(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        if let Some(value) = value {
            self.text_element(name, value)?;
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner().into_inner())
            .map_err(|e| FritzingError::Write(e.to_string()))
    }
}

pub(crate) fn fmt_f64(value: f64) -> String {
    format!("{value}")
}

pub(crate) fn opt_attr(el: &mut BytesStart, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        el.push_attribute((name, value));
    }
}

pub(crate) fn attr_f64(el: &mut BytesStart, name: &str, value: f64) {
    el.push_attribute((name, fmt_f64(value).as_str()));
}

pub(crate) fn opt_attr_f64(el: &mut BytesStart, name: &str, value: Option<f64>) {
    if let Some(value) = value {
        attr_f64(el, name, value);
    }
}

pub(crate) fn opt_attr_bool01(el: &mut BytesStart, name: &str, value: Option<bool>) {
    if let Some(value) = value {
        el.push_attribute((name, if value { "1" } else { "0" }));
    }
}

pub(crate) fn opt_attr_booltf(el: &mut BytesStart, name: &str, value: Option<bool>) {
    if let Some(value) = value {
        el.push_attribute((name, if value { "true" } else { "false" }));
    }
}
