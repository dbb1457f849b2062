use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Error as QError;

use super::types::*;

/// Serialization of a stanza into its wire element.
pub trait QWrite {
    fn qwrite(&self, xml: &mut Writer<impl std::io::Write>) -> Result<(), QError>;
}

/// Transform a stanza into an XML stream of characters.
pub struct Writer<T: std::io::Write> {
    pub q: quick_xml::writer::Writer<T>,
}

impl<T: std::io::Write> Writer<T> {
    /// Open tag carrying the SASL namespace. Only stream-level elements go
    /// through here; the condition child of `failure` inherits the namespace
    /// and is built bare.
    fn create_sasl_element(&mut self, name: &str) -> BytesStart<'static> {
        let mut start = BytesStart::new(name.to_string());
        start.push_attribute(("xmlns", SASL_URN));
        start
    }
}

impl QWrite for AuthMechanism {
    fn qwrite(&self, xml: &mut Writer<impl std::io::Write>) -> Result<(), QError> {
        let mut start = xml.create_sasl_element("auth");
        start.push_attribute(("mechanism", self.mechanism()));
        let end = start.to_end();

        xml.q.write_event(Event::Start(start.clone()))?;
        xml.q
            .write_event(Event::Text(BytesText::new(self.authentication_text())))?;
        xml.q.write_event(Event::End(end))
    }
}

impl QWrite for Challenge {
    fn qwrite(&self, xml: &mut Writer<impl std::io::Write>) -> Result<(), QError> {
        let start = xml.create_sasl_element("challenge");

        match self.data() {
            Some(data) => {
                let end = start.to_end();
                xml.q.write_event(Event::Start(start.clone()))?;
                xml.q.write_event(Event::Text(BytesText::new(data)))?;
                xml.q.write_event(Event::End(end))
            }
            None => xml.q.write_event(Event::Empty(start)),
        }
    }
}

impl QWrite for Response {
    fn qwrite(&self, xml: &mut Writer<impl std::io::Write>) -> Result<(), QError> {
        let start = xml.create_sasl_element("response");

        match self.authentication_text() {
            Some(text) => {
                let end = start.to_end();
                xml.q.write_event(Event::Start(start.clone()))?;
                xml.q.write_event(Event::Text(BytesText::new(text)))?;
                xml.q.write_event(Event::End(end))
            }
            None => xml.q.write_event(Event::Empty(start)),
        }
    }
}

impl QWrite for Success {
    fn qwrite(&self, xml: &mut Writer<impl std::io::Write>) -> Result<(), QError> {
        let start = xml.create_sasl_element("success");

        match self.data() {
            Some(data) => {
                let end = start.to_end();
                xml.q.write_event(Event::Start(start.clone()))?;
                xml.q.write_event(Event::Text(BytesText::new(data)))?;
                xml.q.write_event(Event::End(end))
            }
            None => xml.q.write_event(Event::Empty(start)),
        }
    }
}

impl QWrite for SaslFailure {
    fn qwrite(&self, xml: &mut Writer<impl std::io::Write>) -> Result<(), QError> {
        let start = xml.create_sasl_element("failure");
        let end = start.to_end();

        xml.q.write_event(Event::Start(start.clone()))?;
        // The raw token is authoritative on the wire, the classified
        // condition is local only.
        let condition = BytesStart::new(self.raw_condition());
        xml.q.write_event(Event::Empty(condition))?;
        xml.q.write_event(Event::End(end))
    }
}

impl QWrite for SaslStanza {
    fn qwrite(&self, xml: &mut Writer<impl std::io::Write>) -> Result<(), QError> {
        match self {
            Self::Auth(auth) => auth.qwrite(xml),
            Self::Challenge(challenge) => challenge.qwrite(xml),
            Self::Response(response) => response.qwrite(xml),
            Self::Success(success) => success.qwrite(xml),
            Self::Failure(failure) => failure.qwrite(xml),
        }
    }
}
