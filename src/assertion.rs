//! SAML response decoding and role attribute extraction

pub const ROLE_ATTRIBUTE_NAME: &str = "https://aws.amazon.com/SAML/Attributes/Role";
pub const SESSION_DURATION_ATTRIBUTE_NAME: &str =
    "https://aws.amazon.com/SAML/Attributes/SessionDuration";

/// A role offered by the assertion, paired with the identity provider
/// principal needed to assume it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleGrant {
    pub role_arn: String,
    pub principal_arn: String,
}

#[derive(Debug)]
pub struct AssertionAttributes {
    /// Role grants in document order.
    pub grants: Vec<RoleGrant>,
    /// Requested session duration in seconds; None when the attribute is
    /// absent or its value is not an integer (STS applies its default).
    pub session_duration: Option<u64>,
}

/// Reverse the transport encoding of an intercepted `SAMLResponse` value:
/// base64, then percent-escapes over the decoded bytes, then UTF-8.
pub fn decode(encoded: &str) -> Result<String, crate::error::Error> {
    use base64ct::Encoding;

    let raw = base64ct::Base64::decode_vec(encoded.trim())
        .map_err(|e| crate::error::Error::DecodeError(format!("invalid base64: {e}")))?;

    validate_percent_escapes(&raw)?;

    percent_encoding::percent_decode(&raw)
        .decode_utf8()
        .map(|v| v.into_owned())
        .map_err(|e| crate::error::Error::DecodeError(format!("invalid utf-8: {e}")))
}

// percent_decode passes malformed escapes through untouched; a `%` not
// followed by two hex digits must instead fail the run.
fn validate_percent_escapes(raw: &[u8]) -> Result<(), crate::error::Error> {
    let mut iter = raw.iter().enumerate();
    while let Some((pos, b)) = iter.next() {
        if *b != b'%' {
            continue;
        }
        let hi = iter.next();
        let lo = iter.next();
        match (hi, lo) {
            (Some((_, h)), Some((_, l)))
                if h.is_ascii_hexdigit() && l.is_ascii_hexdigit() => {}
            _ => {
                return Err(crate::error::Error::DecodeError(format!(
                    "malformed percent escape at byte {pos}"
                )))
            }
        }
    }
    Ok(())
}

/// Walk a decoded SAML document for the AWS role and session duration
/// attributes.
pub fn extract(xml: &str) -> Result<AssertionAttributes, crate::error::Error> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| crate::error::Error::DecodeError(format!("invalid xml: {e}")))?;

    let mut grants = Vec::new();
    for attribute in doc
        .descendants()
        .filter(|n| n.attribute("Name") == Some(ROLE_ATTRIBUTE_NAME))
    {
        for value in attribute_values(attribute) {
            grants.push(parse_role_value(&value)?);
        }
    }

    let session_duration = doc
        .descendants()
        .find(|n| n.attribute("Name") == Some(SESSION_DURATION_ATTRIBUTE_NAME))
        .and_then(|n| attribute_values(n).into_iter().next())
        .and_then(|v| v.parse::<u64>().ok());

    Ok(AssertionAttributes {
        grants,
        session_duration,
    })
}

fn attribute_values(attribute: roxmltree::Node<'_, '_>) -> Vec<String> {
    attribute
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "AttributeValue")
        .map(|n| n.text().unwrap_or("").trim().to_string())
        .collect()
}

fn parse_role_value(value: &str) -> Result<RoleGrant, crate::error::Error> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 2 {
        return Err(crate::error::Error::ParseError(format!(
            "role attribute value must be 'role-arn,principal-arn', got {value:?}"
        )));
    }
    Ok(RoleGrant {
        role_arn: parts[0].to_string(),
        principal_arn: parts[1].to_string(),
    })
}
