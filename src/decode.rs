use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use super::error::ParsingError;
use super::types::*;

/// Parse one stanza of the negotiation from its wire form.
///
/// The receive path goes through the same constructors as the send path, so
/// payload normalization and `auth` validation are identical in both
/// directions.
pub fn stanza(input: &str) -> Result<SaslStanza, ParsingError> {
    let mut rdr = NsReader::from_str(input);
    loop {
        match rdr.read_event()? {
            Event::Start(start) => return element(&mut rdr, &start, false),
            Event::Empty(start) => return element(&mut rdr, &start, true),
            Event::Text(text) => {
                if !text.unescape()?.trim().is_empty() {
                    return Err(ParsingError::WrongToken);
                }
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => (),
            Event::Eof => return Err(ParsingError::Eof),
            _ => return Err(ParsingError::WrongToken),
        }
    }
}

fn element(
    rdr: &mut NsReader<&[u8]>,
    start: &BytesStart,
    empty: bool,
) -> Result<SaslStanza, ParsingError> {
    let (ns, local) = rdr.resolve_element(start.name());
    let in_sasl_ns = match ns {
        ResolveResult::Bound(v) => v.into_inner() == SASL_URN.as_bytes(),
        _ => false,
    };
    if !in_sasl_ns {
        return Err(ParsingError::TagNotFound);
    }

    match local.into_inner() {
        b"auth" => {
            let mechanism =
                attribute(rdr, start, "mechanism").ok_or(ParsingError::MissingAttribute)?;
            let text = match empty {
                true => String::new(),
                false => text_content(rdr)?,
            };
            Ok(SaslStanza::Auth(AuthMechanism::new(mechanism, text)?))
        }
        b"challenge" => Ok(SaslStanza::Challenge(Challenge::new(payload(rdr, empty)?))),
        b"response" => Ok(SaslStanza::Response(match payload(rdr, empty)? {
            Some(text) => Response::new(text),
            None => Response::empty(),
        })),
        b"success" => Ok(SaslStanza::Success(Success::new(payload(rdr, empty)?))),
        b"failure" => match empty {
            true => Err(ParsingError::MissingChild),
            false => Ok(SaslStanza::Failure(failure(rdr)?)),
        },
        _ => Err(ParsingError::TagNotFound),
    }
}

/// Text content of the element being read, `None` when the tag was
/// self-closed.
fn payload(rdr: &mut NsReader<&[u8]>, empty: bool) -> Result<Option<String>, ParsingError> {
    match empty {
        true => Ok(None),
        false => text_content(rdr).map(Some),
    }
}

fn text_content(rdr: &mut NsReader<&[u8]>) -> Result<String, ParsingError> {
    let mut acc = String::new();
    loop {
        match rdr.read_event()? {
            Event::Text(escaped) => acc.push_str(escaped.unescape()?.as_ref()),
            Event::CData(unescaped) => acc.push_str(std::str::from_utf8(unescaped.as_ref())?),
            Event::End(_) => return Ok(acc),
            Event::Eof => return Err(ParsingError::Eof),
            _ => return Err(ParsingError::WrongToken),
        }
    }
}

/// First child element names the condition; any trailing children (such as a
/// descriptive `<text>`) are skipped.
fn failure(rdr: &mut NsReader<&[u8]>) -> Result<SaslFailure, ParsingError> {
    let mut condition: Option<String> = None;
    loop {
        match rdr.read_event()? {
            Event::Start(child) => {
                let token = local_name(rdr, &child)?;
                rdr.read_to_end(child.to_end().name())?;
                condition.get_or_insert(token);
            }
            Event::Empty(child) => {
                let token = local_name(rdr, &child)?;
                condition.get_or_insert(token);
            }
            Event::Text(text) => {
                if !text.unescape()?.trim().is_empty() {
                    return Err(ParsingError::WrongToken);
                }
            }
            Event::End(_) => {
                return condition
                    .map(SaslFailure::new)
                    .ok_or(ParsingError::MissingChild)
            }
            Event::Eof => return Err(ParsingError::Eof),
            _ => return Err(ParsingError::WrongToken),
        }
    }
}

fn attribute(rdr: &NsReader<&[u8]>, start: &BytesStart, name: &str) -> Option<String> {
    match start.try_get_attribute(name) {
        Ok(Some(attr)) => attr
            .decode_and_unescape_value(rdr)
            .ok()
            .map(|v| v.into_owned()),
        _ => None,
    }
}

fn local_name(rdr: &NsReader<&[u8]>, start: &BytesStart) -> Result<String, ParsingError> {
    let (_, local) = rdr.resolve_element(start.name());
    Ok(std::str::from_utf8(local.into_inner())?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_plain() {
        let src = r#"<auth xmlns="urn:ietf:params:xml:ns:xmpp-sasl" mechanism="PLAIN">AGFkbWluAHBhc3M=</auth>"#;
        assert_eq!(
            stanza(src).unwrap(),
            SaslStanza::Auth(AuthMechanism::new("PLAIN", "AGFkbWluAHBhc3M=").unwrap())
        );
    }

    #[test]
    fn auth_without_mechanism() {
        let src = r#"<auth xmlns="urn:ietf:params:xml:ns:xmpp-sasl">AGFkbWluAHBhc3M=</auth>"#;
        assert!(matches!(
            stanza(src),
            Err(ParsingError::MissingAttribute)
        ));
    }

    #[test]
    fn auth_without_text_is_invalid() {
        let src = r#"<auth xmlns="urn:ietf:params:xml:ns:xmpp-sasl" mechanism="PLAIN"/>"#;
        assert!(matches!(stanza(src), Err(ParsingError::Invalid(_))));
    }

    #[test]
    fn challenge_with_data() {
        let src = r#"<challenge xmlns="urn:ietf:params:xml:ns:xmpp-sasl">cmVhbG09ImV4YW1wbGUuY29tIg==</challenge>"#;
        assert_eq!(
            stanza(src).unwrap(),
            SaslStanza::Challenge(Challenge::new(Some("cmVhbG09ImV4YW1wbGUuY29tIg==".into())))
        );
    }

    #[test]
    fn whitespace_only_challenge_has_no_data() {
        let src = "<challenge xmlns=\"urn:ietf:params:xml:ns:xmpp-sasl\">  \t</challenge>";
        assert_eq!(
            stanza(src).unwrap(),
            SaslStanza::Challenge(Challenge::new(None))
        );
    }

    #[test]
    fn empty_response() {
        let src = r#"<response xmlns="urn:ietf:params:xml:ns:xmpp-sasl"/>"#;
        assert_eq!(stanza(src).unwrap(), SaslStanza::Response(Response::empty()));
    }

    #[test]
    fn empty_success() {
        let src = r#"<success xmlns="urn:ietf:params:xml:ns:xmpp-sasl"/>"#;
        assert_eq!(stanza(src).unwrap(), SaslStanza::Success(Success::new(None)));
    }

    #[test]
    fn failure_not_authorized() {
        let src =
            r#"<failure xmlns="urn:ietf:params:xml:ns:xmpp-sasl"><not-authorized/></failure>"#;
        let got = stanza(src).unwrap();
        assert_eq!(got, SaslStanza::Failure(SaslFailure::new("not-authorized")));
        match got {
            SaslStanza::Failure(failure) => {
                assert_eq!(failure.condition(), SaslCondition::NotAuthorized)
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn rfc6120_failure_with_descriptive_text() {
        let src = r#"<failure xmlns="urn:ietf:params:xml:ns:xmpp-sasl">
            <account-disabled/>
            <text xml:lang="en">Call 212-555-1212 for assistance.</text>
        </failure>"#;
        let got = stanza(src).unwrap();
        match got {
            SaslStanza::Failure(failure) => {
                assert_eq!(failure.condition(), SaslCondition::AccountDisabled);
                assert_eq!(failure.raw_condition(), "account-disabled");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn failure_with_unknown_condition() {
        let src = r#"<failure xmlns="urn:ietf:params:xml:ns:xmpp-sasl"><bogus-condition-xyz/></failure>"#;
        match stanza(src).unwrap() {
            SaslStanza::Failure(failure) => {
                assert_eq!(failure.condition(), SaslCondition::NotAuthorized);
                assert_eq!(failure.raw_condition(), "bogus-condition-xyz");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn failure_without_condition() {
        let src = r#"<failure xmlns="urn:ietf:params:xml:ns:xmpp-sasl"></failure>"#;
        assert!(matches!(stanza(src), Err(ParsingError::MissingChild)));
    }

    #[test]
    fn foreign_namespace_is_rejected() {
        let src = r#"<auth xmlns="jabber:client" mechanism="PLAIN">AGFkbWluAHBhc3M=</auth>"#;
        assert!(matches!(stanza(src), Err(ParsingError::TagNotFound)));
    }

    #[test]
    fn unknown_element_is_rejected() {
        let src = r#"<abort xmlns="urn:ietf:params:xml:ns:xmpp-sasl"/>"#;
        assert!(matches!(stanza(src), Err(ParsingError::TagNotFound)));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(stanza(""), Err(ParsingError::Eof)));
    }
}
