use std::fmt;

use crate::gazetteer::{Gazetteer, GAZETTEER};

/// Outcome for text that names no known area
pub const TRANSIENT: &str = "TRANSIENT";

/// Outcome for records with no address text at all
pub const MISSING: &str = "MISSING";

/// Renderings of absent spreadsheet values that carry no address
const NULL_TOKENS: &[&str] = &["NAN", "NONE"];

/// Standardized address for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAddress {
    /// A canonical area from the gazetteer
    Area(String),
    /// Address text present but not recognized
    Transient,
    /// No address text
    Missing,
}

impl ResolvedAddress {
    pub fn as_str(&self) -> &str {
        match self {
            ResolvedAddress::Area(name) => name,
            ResolvedAddress::Transient => TRANSIENT,
            ResolvedAddress::Missing => MISSING,
        }
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the address fields of a record against the built-in gazetteer
pub fn resolve(address: Option<&str>, specific_address: Option<&str>) -> ResolvedAddress {
    resolve_with(&GAZETTEER, address, specific_address)
}

/// Resolve against an explicit gazetteer.
///
/// Aliases are tried first, then canonical areas, each in list order; the
/// first whole-word occurrence in the combined text wins.
pub fn resolve_with(
    gazetteer: &Gazetteer,
    address: Option<&str>,
    specific_address: Option<&str>,
) -> ResolvedAddress {
    let text = combined_search_text(address, specific_address);

    if let Some(alias) = gazetteer.aliases().find(|a| a.alias().occurs_in(&text)) {
        return ResolvedAddress::Area(alias.parent().to_string());
    }

    if let Some(area) = gazetteer.areas().find(|a| a.occurs_in(&text)) {
        return ResolvedAddress::Area(area.name().to_string());
    }

    if text.is_empty() {
        ResolvedAddress::Missing
    } else {
        ResolvedAddress::Transient
    }
}

/// Uppercased, trimmed concatenation of both address fields
pub fn combined_search_text(address: Option<&str>, specific_address: Option<&str>) -> String {
    let address = clean_field(address);
    let specific_address = clean_field(specific_address);
    format!("{} {}", address, specific_address).trim().to_string()
}

fn clean_field(value: Option<&str>) -> String {
    let upper = value.unwrap_or("").to_uppercase();
    let trimmed = upper.trim();
    if NULL_TOKENS.contains(&trimmed) {
        String::new()
    } else {
        trimmed.to_string()
    }
}
