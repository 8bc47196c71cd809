//! Well-known domain types and their leaf parsers
//!
//! Each well-known kind has a canonical text form (see
//! [`Data`](crate::Data)'s `Display`) that its parser accepts back.

mod byte_size;
mod mail;
mod temporal;

use std::net::IpAddr;

use regex::Regex;
use url::Url;

pub use byte_size::ByteSize;
pub use mail::MailAddress;
pub use temporal::{format_duration, parse_duration, parse_timestamp, zero_timestamp};

use crate::config::ConvConfig;
use crate::data::Data;
use crate::error::ParseError;
use crate::kind::WellKnown;

pub fn parse_ip_addr(input: &str) -> Result<IpAddr, ParseError> {
    input.trim().parse().map_err(|source| ParseError::IpAddr {
        input: input.to_owned(),
        source,
    })
}

/// Parse a URL; empty text yields the zero URL
pub fn parse_url(input: &str) -> Result<Option<Url>, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Url::parse(trimmed)
        .map(Some)
        .map_err(|source| ParseError::Url {
            input: input.to_owned(),
            source,
        })
}

pub fn parse_regex(input: &str) -> Result<Regex, ParseError> {
    Regex::new(input).map_err(|source| ParseError::Regex {
        input: input.to_owned(),
        source,
    })
}

/// Run the leaf parser for `target` over canonical text
pub fn parse(target: WellKnown, input: &str, config: &ConvConfig) -> Result<Data, ParseError> {
    Ok(match target {
        WellKnown::Duration => Data::Duration(parse_duration(input)?),
        WellKnown::Timestamp => Data::Timestamp(parse_timestamp(input, &config.time_layout)?),
        WellKnown::IpAddr => Data::IpAddr(parse_ip_addr(input)?),
        WellKnown::Url => Data::Url(parse_url(input)?),
        WellKnown::MailAddress => Data::MailAddress(MailAddress::parse(input)?),
        WellKnown::Regex => Data::Regex(Some(parse_regex(input)?)),
        WellKnown::ByteSize => Data::ByteSize(ByteSize::parse(input)?),
    })
}
