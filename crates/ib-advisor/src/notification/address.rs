use std::fmt;

use email_address::Options;
use serde::Serialize;

const MAX_ADDRESS_LEN: usize = 254;

/// Mailbox address (`local@domain`), checked against RFC 5322 with UTF-8 (RFC 6531).
///
/// Display names (`Name <a@b.c>`) and IP domain literals are refused, and the domain
/// must carry a top-level label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(email_address::EmailAddress);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidEmailAddress {
    #[error("address is empty")]
    Empty,
    #[error("address is longer than 254 characters")]
    TooLong,
    #[error("address is malformed: {0}")]
    Malformed(#[source] email_address::Error),
}

fn parse_options() -> Options {
    Options::default()
        .with_required_tld()
        .without_display_text()
        .without_domain_literal()
}

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, InvalidEmailAddress> {
        let address = raw.trim();
        if address.is_empty() {
            return Err(InvalidEmailAddress::Empty);
        }
        if address.chars().count() > MAX_ADDRESS_LEN {
            return Err(InvalidEmailAddress::TooLong);
        }

        email_address::EmailAddress::parse_with_options(address, parse_options())
            .map(Self)
            .map_err(InvalidEmailAddress::Malformed)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Everything before the final `@`, used as the recipient's display name.
    pub fn local_part(&self) -> &str {
        self.0.local_part()
    }

    pub fn domain(&self) -> &str {
        self.0.domain()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(raw: &str) -> bool {
        matches!(
            EmailAddress::parse(raw),
            Err(InvalidEmailAddress::Malformed(_))
        )
    }

    #[test]
    fn accepts_common_addresses() {
        for raw in [
            "student@school.edu",
            "first.last+ib@mail.example.co.uk",
            "o'brien@sub-domain.example.org",
            "  padded@example.com  ",
        ] {
            assert!(EmailAddress::parse(raw).is_ok(), "{raw}");
        }
    }

    #[test]
    fn accepts_international_and_quoted_addresses() {
        for raw in [
            "josé@example.com",
            "user@münchen.de",
            "用户@例子.广告",
            "\"quoted\"@example.com",
            "\"with space\"@example.com",
        ] {
            assert!(EmailAddress::parse(raw).is_ok(), "{raw}");
        }

        let address = EmailAddress::parse("josé@münchen.de").expect("valid");
        assert_eq!(address.local_part(), "josé");
        assert_eq!(address.domain(), "münchen.de");
    }

    #[test]
    fn trims_and_splits_parts() {
        let address = EmailAddress::parse("  jane.doe@school.example ").expect("valid");
        assert_eq!(address.as_str(), "jane.doe@school.example");
        assert_eq!(address.local_part(), "jane.doe");
        assert_eq!(address.domain(), "school.example");
        assert_eq!(address.to_string(), "jane.doe@school.example");
    }

    #[test]
    fn rejects_structural_problems() {
        assert_eq!(EmailAddress::parse("   "), Err(InvalidEmailAddress::Empty));
        assert_eq!(
            EmailAddress::parse("no-at-sign.example.com"),
            Err(InvalidEmailAddress::Malformed(
                email_address::Error::MissingSeparator
            ))
        );
        assert!(malformed("a@b@example.com"));

        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(EmailAddress::parse(&long), Err(InvalidEmailAddress::TooLong));
    }

    #[test]
    fn rejects_bad_local_parts() {
        for raw in [
            "@example.com",
            ".lead@example.com",
            "trail.@example.com",
            "dou..ble@example.com",
            "sp ace@example.com",
            "\"unbalanced@example.com",
        ] {
            assert!(malformed(raw), "{raw}");
        }
    }

    #[test]
    fn rejects_bad_domains() {
        for raw in [
            "user@",
            "user@localhost",
            "user@-example.com",
            "user@example-.com",
            "user@example..com",
            "user@[127.0.0.1]",
        ] {
            assert!(malformed(raw), "{raw}");
        }
    }

    #[test]
    fn rejects_display_names() {
        assert!(malformed("Jane Doe <jane@example.com>"));
        assert!(malformed("<jane@example.com>"));
    }
}
