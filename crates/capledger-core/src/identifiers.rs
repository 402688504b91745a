use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: String) -> Self {
                Self(value)
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError {
                        field: stringify!($name),
                        expected: $pattern,
                        value: s,
                    });
                }
                Ok(Self(s))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

newtype!(
    ShareClassId,
    "Stable identifier for share classes (`class:name`, lowercase, URL-safe).",
    r"^class:[a-z0-9][a-z0-9_-]{0,62}$"
);
newtype!(
    ShareholderId,
    "Stable identifier for shareholders (`holder:name`, lowercase, URL-safe).",
    r"^holder:[a-z0-9][a-z0-9_-]{0,62}$"
);
newtype!(
    EntityId,
    "Stable identifier for legal entities (`entity:name`, lowercase, URL-safe).",
    r"^entity:[a-z0-9][a-z0-9_-]{0,62}$"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_identifiers() {
        assert!(ShareClassId::parse("class:common").is_ok());
        assert!(ShareholderId::parse("holder:alice").is_ok());
        assert!(EntityId::parse("entity:acme-holdings_llc").is_ok());
    }

    #[test]
    fn rejects_wrong_prefix_and_case() {
        assert!(ShareClassId::parse("holder:common").is_err());
        assert!(ShareholderId::parse("holder:Alice").is_err());
        assert!(EntityId::parse("entity:").is_err());
    }
}
