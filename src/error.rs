use thiserror::Error;

/// Rejected at construction: the stanza would be illegal on the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidStanza {
    #[error("SASL mechanism must not be absent")]
    EmptyMechanism,
    #[error("SASL authentication text must not be absent or empty (RFC 6120 §6.4.2)")]
    EmptyAuthenticationText,
}

#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("Missing child")]
    MissingChild,
    #[error("Missing attribute")]
    MissingAttribute,
    #[error("Wrong token")]
    WrongToken,
    #[error("Tag not found")]
    TagNotFound,
    #[error("Invalid stanza: {0}")]
    Invalid(#[from] InvalidStanza),
    #[error("Utf8 error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),
    #[error("Quick XML error: {0}")]
    QuickXml(#[from] quick_xml::Error),
    #[error("Found EOF while expecting data")]
    Eof,
}
