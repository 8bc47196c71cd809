//! Mail address payloads

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A single mail address with an optional display name
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MailAddress {
    pub name: Option<String>,
    pub address: String,
}

impl MailAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            name: None,
            address: address.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parse `addr`, `<addr>`, `Name <addr>` or `"Name" <addr>`
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let fail = |reason| ParseError::MailAddress {
            input: input.to_owned(),
            reason,
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(fail("empty address"));
        }

        let (name, address) = if let Some(head) = trimmed.strip_suffix('>') {
            let open = head.rfind('<').ok_or_else(|| fail("unbalanced angle brackets"))?;
            let name = head[..open].trim();
            let name = match name.strip_prefix('"').and_then(|n| n.strip_suffix('"')) {
                Some(quoted) => quoted.replace("\\\"", "\""),
                None if name.contains('"') => return Err(fail("unbalanced quotes")),
                None => name.to_owned(),
            };
            (Some(name).filter(|n| !n.is_empty()), &head[open + 1..])
        } else if trimmed.contains('<') {
            return Err(fail("unbalanced angle brackets"));
        } else {
            (None, trimmed)
        };

        validate_address(address).map_err(fail)?;
        Ok(Self {
            name,
            address: address.to_owned(),
        })
    }
}

fn validate_address(address: &str) -> Result<(), &'static str> {
    if address.chars().any(|c| c.is_whitespace() || c == '<' || c == '>') {
        return Err("unexpected character in address");
    }
    let (local, domain) = address.rsplit_once('@').ok_or("missing '@'")?;
    if local.is_empty() {
        return Err("empty local part");
    }
    if domain.is_empty() || domain.starts_with('.') || domain.ends_with('.') {
        return Err("invalid domain");
    }
    Ok(())
}

impl Display for MailAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "\"{}\" <{}>", name.replace('"', "\\\""), self.address),
            None => write!(f, "<{}>", self.address),
        }
    }
}

impl FromStr for MailAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
