pub mod decode;
pub mod encode;
pub mod error;
/// Stanzas of the XMPP SASL negotiation
///
/// ## Trace
///
/// ```text
/// C: <auth xmlns="urn:ietf:params:xml:ns:xmpp-sasl" mechanism="PLAIN">AGFkbWluAHBhc3M=</auth>
/// S: <success xmlns="urn:ietf:params:xml:ns:xmpp-sasl"/>
///
/// C: <auth xmlns="urn:ietf:params:xml:ns:xmpp-sasl" mechanism="SCRAM-SHA-1">biwsbj1qdWxpZXQscj1vTXNUQUF3QUFBQU1BQUFBTlAwVEFBQUFBQUJQVTBBQQ==</auth>
/// S: <challenge xmlns="urn:ietf:params:xml:ns:xmpp-sasl">cj1vTXNUQUF3QUFBQU1BQUFBTlAwVEFBQUFBQUJQVTBBQWUxMjRFOTU1ZjJlNA==</challenge>
/// C: <response xmlns="urn:ietf:params:xml:ns:xmpp-sasl">Yz1iaXdzLHI9b01zVEFBd0FBQUFNQUFBQU5QMFRBQUFBQUFCUFUwQUFlMTI0RTk1NWYyZTQ=</response>
/// S: <failure xmlns="urn:ietf:params:xml:ns:xmpp-sasl"><not-authorized/></failure>
/// ```
///
/// ## RFC References
///
/// XMPP SASL negotiation - https://datatracker.ietf.org/doc/html/rfc6120#section-6
///
/// SASL framework - https://datatracker.ietf.org/doc/html/rfc4422
///
/// PLAIN SASL - https://datatracker.ietf.org/doc/html/rfc4616
pub mod types;
