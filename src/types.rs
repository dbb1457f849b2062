use crate::error::InvalidStanza;

/// Namespace carried by every element of the negotiation.
pub const SASL_URN: &str = "urn:ietf:params:xml:ns:xmpp-sasl";

/// An empty or whitespace-only payload carries no data and is stored as
/// absent. Non-blank payloads are kept verbatim.
fn non_blank(data: Option<String>) -> Option<String> {
    data.filter(|d| !d.trim().is_empty())
}

/// Mechanism selection, the element opening the negotiation.
///
/// The initial element must carry authentication text even when the chosen
/// mechanism has no initial data to send (RFC 6120 §6.4.2); callers encode
/// "no initial response" with the `=` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthMechanism {
    mechanism: String,
    authentication_text: String,
}

impl AuthMechanism {
    pub fn new(
        mechanism: impl Into<String>,
        authentication_text: impl Into<String>,
    ) -> Result<Self, InvalidStanza> {
        let mechanism = mechanism.into();
        let authentication_text = authentication_text.into();
        if mechanism.is_empty() {
            return Err(InvalidStanza::EmptyMechanism);
        }
        if authentication_text.is_empty() {
            return Err(InvalidStanza::EmptyAuthenticationText);
        }
        Ok(Self {
            mechanism,
            authentication_text,
        })
    }

    pub fn mechanism(&self) -> &str {
        &self.mechanism
    }

    pub fn authentication_text(&self) -> &str {
        &self.authentication_text
    }
}

/// Server challenge carrying an opaque, mechanism-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    data: Option<String>,
}

impl Challenge {
    pub fn new(data: Option<String>) -> Self {
        Self {
            data: non_blank(data),
        }
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

/// Client reply to a challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    authentication_text: Option<String>,
}

impl Response {
    /// A response carrying no payload at all.
    pub fn empty() -> Self {
        Self {
            authentication_text: None,
        }
    }

    pub fn new(authentication_text: impl Into<String>) -> Self {
        Self {
            authentication_text: non_blank(Some(authentication_text.into())),
        }
    }

    pub fn authentication_text(&self) -> Option<&str> {
        self.authentication_text.as_deref()
    }
}

/// End of a successful negotiation, with optional additional data for the
/// SASL layer (RFC 6120 §6.3.10).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Success {
    data: Option<String>,
}

impl Success {
    pub fn new(data: Option<String>) -> Self {
        Self {
            data: non_blank(data),
        }
    }

    /// Additional data for the SASL layer, if the server sent any.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

/// The closed set of failure conditions a server may report (RFC 6120 §6.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaslCondition {
    Aborted,
    AccountDisabled,
    CredentialsExpired,
    EncryptionRequired,
    IncorrectEncoding,
    InvalidAuthzid,
    InvalidMechanism,
    MalformedRequest,
    MechanismTooWeak,
    NotAuthorized,
    TemporaryAuthFailure,
}

impl SaslCondition {
    /// Canonical element name of the condition on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aborted => "aborted",
            Self::AccountDisabled => "account-disabled",
            Self::CredentialsExpired => "credentials-expired",
            Self::EncryptionRequired => "encryption-required",
            Self::IncorrectEncoding => "incorrect-encoding",
            Self::InvalidAuthzid => "invalid-authzid",
            Self::InvalidMechanism => "invalid-mechanism",
            Self::MalformedRequest => "malformed-request",
            Self::MechanismTooWeak => "mechanism-too-weak",
            Self::NotAuthorized => "not-authorized",
            Self::TemporaryAuthFailure => "temporary-auth-failure",
        }
    }

    /// Map a server-supplied condition token to a member of the closed set.
    ///
    /// RFC 6120 §6.5 requires unrecognized conditions to be treated as a
    /// generic authentication failure, so the lookup is total: anything
    /// unknown classifies as [`SaslCondition::NotAuthorized`].
    pub fn classify(token: &str) -> Self {
        match token {
            "aborted" => Self::Aborted,
            "account-disabled" => Self::AccountDisabled,
            "credentials-expired" => Self::CredentialsExpired,
            "encryption-required" => Self::EncryptionRequired,
            "incorrect-encoding" => Self::IncorrectEncoding,
            "invalid-authzid" => Self::InvalidAuthzid,
            "invalid-mechanism" => Self::InvalidMechanism,
            "malformed-request" => Self::MalformedRequest,
            "mechanism-too-weak" => Self::MechanismTooWeak,
            "not-authorized" => Self::NotAuthorized,
            "temporary-auth-failure" => Self::TemporaryAuthFailure,
            unknown => {
                tracing::warn!(token = unknown, "Unrecognized SASL failure condition");
                Self::NotAuthorized
            }
        }
    }
}

impl std::fmt::Display for SaslCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication failure reported by the server.
///
/// The raw condition token is what round-trips on the wire; `condition` is
/// its local classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaslFailure {
    raw_condition: String,
    condition: SaslCondition,
}

impl SaslFailure {
    pub fn new(raw_condition: impl Into<String>) -> Self {
        let raw_condition = raw_condition.into();
        let condition = SaslCondition::classify(&raw_condition);
        Self {
            raw_condition,
            condition,
        }
    }

    pub fn condition(&self) -> SaslCondition {
        self.condition
    }

    /// The condition token exactly as received.
    pub fn raw_condition(&self) -> &str {
        &self.raw_condition
    }
}

/// Any element of the negotiation, one case per stanza kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaslStanza {
    Auth(AuthMechanism),
    Challenge(Challenge),
    Response(Response),
    Success(Success),
    Failure(SaslFailure),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_requires_mechanism() {
        assert_eq!(
            AuthMechanism::new("", "AGFkbWluAHBhc3M="),
            Err(InvalidStanza::EmptyMechanism)
        );
    }

    #[test]
    fn auth_requires_authentication_text() {
        assert_eq!(
            AuthMechanism::new("PLAIN", ""),
            Err(InvalidStanza::EmptyAuthenticationText)
        );
        assert_eq!(
            AuthMechanism::new("SCRAM-SHA-1", ""),
            Err(InvalidStanza::EmptyAuthenticationText)
        );
    }

    #[test]
    fn auth_keeps_whitespace_text() {
        // Only exact emptiness is a construction error here, unlike the
        // optional payloads below.
        let auth = AuthMechanism::new("EXTERNAL", " ").unwrap();
        assert_eq!(auth.authentication_text(), " ");
    }

    #[test]
    fn blank_payloads_are_absent() {
        assert_eq!(Challenge::new(Some("".into())), Challenge::new(None));
        assert_eq!(Challenge::new(Some(" \t\r\n".into())).data(), None);
        assert_eq!(Response::new("   "), Response::empty());
        assert_eq!(Success::new(Some("  ".into())).data(), None);
    }

    #[test]
    fn non_blank_payloads_are_kept_verbatim() {
        let challenge = Challenge::new(Some("cmVhbG09ImV4YW1wbGUuY29tIg==".into()));
        assert_eq!(challenge.data(), Some("cmVhbG09ImV4YW1wbGUuY29tIg=="));
    }

    #[test]
    fn classify_known_conditions() {
        assert_eq!(
            SaslCondition::classify("not-authorized"),
            SaslCondition::NotAuthorized
        );
        assert_eq!(
            SaslCondition::classify("credentials-expired"),
            SaslCondition::CredentialsExpired
        );
        assert_eq!(
            SaslCondition::classify("mechanism-too-weak"),
            SaslCondition::MechanismTooWeak
        );
    }

    #[test]
    fn rfc6120_unknown_condition_fallback() {
        assert_eq!(
            SaslCondition::classify("bogus-condition-xyz"),
            SaslCondition::NotAuthorized
        );
    }

    #[test]
    fn failure_keeps_raw_token() {
        let failure = SaslFailure::new("bogus-condition-xyz");
        assert_eq!(failure.condition(), SaslCondition::NotAuthorized);
        assert_eq!(failure.raw_condition(), "bogus-condition-xyz");
    }
}
