// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Server region records and login-time normalization

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Matches the first host label of a region base URI, e.g. `//wus2.` in
/// `https://wus2.core.gssv-play-prod.xboxlive.com`
static SUBDOMAIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//(\w+)\.").expect("subdomain pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Continent {
    AmericaNorth,
    AmericaSouth,
    Asia,
    Australia,
    Europe,
    Other,
}

impl Continent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Continent::AmericaNorth => "america-north",
            Continent::AmericaSouth => "america-south",
            Continent::Asia => "asia",
            Continent::Australia => "australia",
            Continent::Europe => "europe",
            Continent::Other => "other",
        }
    }
}

impl std::fmt::Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static info for a region the client knows about
#[derive(Debug, Clone, Copy)]
pub struct KnownRegion {
    pub name: &'static str,
    pub flag: &'static str,
    pub display_name: &'static str,
    pub continent: Continent,
}

const fn known(
    name: &'static str,
    flag: &'static str,
    display_name: &'static str,
    continent: Continent,
) -> KnownRegion {
    KnownRegion {
        name,
        flag,
        display_name,
        continent,
    }
}

/// Known regions in display priority order
pub const KNOWN_REGIONS: [KnownRegion; 19] = [
    known("EASTUS", "🇺🇸", "East US", Continent::AmericaNorth),
    known("EASTUS2", "🇺🇸", "East US 2", Continent::AmericaNorth),
    known("NORTHCENTRALUS", "🇺🇸", "North Central US", Continent::AmericaNorth),
    known("SOUTHCENTRALUS", "🇺🇸", "South Central US", Continent::AmericaNorth),
    known("WESTUS", "🇺🇸", "West US", Continent::AmericaNorth),
    known("WESTUS2", "🇺🇸", "West US 2", Continent::AmericaNorth),
    known("WESTUS3", "🇺🇸", "West US 3", Continent::AmericaNorth),
    known("MEXICOCENTRAL", "🇲🇽", "Mexico Central", Continent::AmericaNorth),
    known("BRAZILSOUTH", "🇧🇷", "Brazil South", Continent::AmericaSouth),
    known("CHILECENTRAL", "🇨🇱", "Chile Central", Continent::AmericaSouth),
    known("JAPANEAST", "🇯🇵", "Japan East", Continent::Asia),
    known("KOREACENTRAL", "🇰🇷", "Korea Central", Continent::Asia),
    known("CENTRALINDIA", "🇮🇳", "Central India", Continent::Asia),
    known("SOUTHINDIA", "🇮🇳", "South India", Continent::Asia),
    known("AUSTRALIAEAST", "🇦🇺", "Australia East", Continent::Australia),
    known("AUSTRALIASOUTHEAST", "🇦🇺", "Australia South East", Continent::Australia),
    known("SWEDENCENTRAL", "🇸🇪", "Sweden Central", Continent::Europe),
    known("UKSOUTH", "🇬🇧", "UK South", Continent::Europe),
    known("WESTEUROPE", "🇳🇱", "West Europe", Continent::Europe),
];

/// Look up a region by canonical name
pub fn known_region(name: &str) -> Option<&'static KnownRegion> {
    let canonical = name.to_uppercase();
    KNOWN_REGIONS.iter().find(|region| region.name == canonical)
}

/// A region as advertised by the login endpoint, plus client-side labels.
///
/// Fields the client does not model are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRegion {
    pub name: String,
    #[serde(default)]
    pub base_uri: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<Continent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServerRegion {
    pub fn new(name: impl Into<String>, base_uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_uri: base_uri.into(),
            is_default: false,
            display_name: None,
            short_name: None,
            continent: None,
            extra: Map::new(),
        }
    }

    /// Canonical (upper-case) table key
    pub fn key(&self) -> String {
        self.name.to_uppercase()
    }
}

/// Ordered set of regions keyed by canonical name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RegionTable(Vec<ServerRegion>);

impl RegionTable {
    pub fn get(&self, name: &str) -> Option<&ServerRegion> {
        let canonical = name.to_uppercase();
        self.0.iter().find(|region| region.key() == canonical)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Region whose base URI is exactly `origin`
    pub fn find_by_origin(&self, origin: &str) -> Option<&ServerRegion> {
        self.0.iter().find(|region| region.base_uri == origin)
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.iter().map(ServerRegion::key).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServerRegion> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<ServerRegion> {
        self.0
    }
}

/// Result of normalizing an advertised region list
#[derive(Debug, Clone, Default)]
pub struct NormalizedRegions {
    pub table: RegionTable,
    /// The server's default region, after labelling
    pub selected: Option<ServerRegion>,
}

fn label_region(mut region: ServerRegion, debug: bool) -> ServerRegion {
    let key = region.key();
    let subdomain = SUBDOMAIN_PATTERN
        .captures(&region.base_uri)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let short_name = match (known_region(&key), subdomain) {
        (Some(info), Some(subdomain)) => {
            region.display_name = Some(info.display_name.to_string());
            region.continent = Some(info.continent);
            format!("{} {}", info.flag, subdomain)
        }
        (Some(info), None) => {
            region.display_name = Some(info.display_name.to_string());
            region.continent = Some(info.continent);
            format!("{} {}", info.flag, region.name)
        }
        (None, subdomain) => {
            region.continent = Some(Continent::Other);
            if debug {
                tracing::warn!(region = %key, "New server region advertised");
            }
            subdomain.unwrap_or_else(|| region.name.clone())
        }
    };

    region.short_name = Some(short_name.to_uppercase());
    region
}

/// Label and order the regions advertised at login.
///
/// Known regions come first in [`KNOWN_REGIONS`] order, unknown ones follow
/// in the order the server listed them. A name advertised twice keeps its
/// last record.
pub fn normalize_regions(regions: &[ServerRegion], debug: bool) -> NormalizedRegions {
    let mut by_key: HashMap<String, ServerRegion> = HashMap::new();
    let mut unknown_order: Vec<String> = Vec::new();
    let mut selected_key: Option<String> = None;

    for region in regions {
        let labelled = label_region(region.clone(), debug);
        let key = labelled.key();

        if labelled.is_default {
            selected_key = Some(key.clone());
        }
        if known_region(&key).is_none() && !unknown_order.contains(&key) {
            unknown_order.push(key.clone());
        }
        by_key.insert(key, labelled);
    }

    let order = KNOWN_REGIONS
        .iter()
        .map(|known| known.name.to_string())
        .chain(unknown_order);

    let mut table = Vec::with_capacity(by_key.len());
    for key in order {
        if let Some(region) = by_key.remove(&key) {
            table.push(region);
        }
    }
    let table = RegionTable(table);

    let selected = selected_key.and_then(|key| table.get(&key).cloned());

    NormalizedRegions { table, selected }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(name: &str, subdomain: &str) -> ServerRegion {
        ServerRegion::new(
            name,
            format!("https://{}.core.gssv-play-prod.xboxlive.com", subdomain),
        )
    }

    #[test]
    fn test_known_and_unknown_ordering() {
        let mut east = region("EastUS", "eus");
        east.is_default = true;
        let advertised = vec![
            region("WestUS2", "wus2"),
            region("UnknownRegion", "unk"),
            east,
        ];

        let normalized = normalize_regions(&advertised, false);
        assert_eq!(
            normalized.table.keys(),
            vec!["EASTUS", "WESTUS2", "UNKNOWNREGION"]
        );

        let unknown = normalized.table.get("unknownregion").unwrap();
        assert_eq!(unknown.continent, Some(Continent::Other));
        assert_eq!(unknown.short_name.as_deref(), Some("UNK"));

        let west = normalized.table.get("WESTUS2").unwrap();
        assert_eq!(west.short_name.as_deref(), Some("🇺🇸 WUS2"));
        assert_eq!(west.display_name.as_deref(), Some("West US 2"));
        assert_eq!(west.continent, Some(Continent::AmericaNorth));

        let selected = normalized.selected.unwrap();
        assert_eq!(selected.key(), "EASTUS");
        assert_eq!(selected.short_name.as_deref(), Some("🇺🇸 EUS"));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let advertised = vec![
            region("JapanEast", "jpe"),
            region("NewRegion", "nr1"),
            region("UKSouth", "uks"),
        ];
        let once = normalize_regions(&advertised, false);
        let twice = normalize_regions(&once.table.clone().into_vec(), false);
        assert_eq!(once.table, twice.table);
    }

    #[test]
    fn test_extra_fields_survive() {
        let parsed: ServerRegion = serde_json::from_value(serde_json::json!({
            "name": "WestEurope",
            "baseUri": "https://weu.core.gssv-play-prod.xboxlive.com",
            "networkTestHostname": "weu.network",
            "isDefault": false,
            "systemUpdateGroups": ["a"]
        }))
        .unwrap();

        let normalized = normalize_regions(&[parsed], false);
        let out = serde_json::to_value(normalized.table.get("WESTEUROPE").unwrap()).unwrap();
        assert_eq!(out["networkTestHostname"], "weu.network");
        assert_eq!(out["systemUpdateGroups"][0], "a");
        assert_eq!(out["continent"], "europe");
        assert_eq!(out["shortName"], "🇳🇱 WEU");
    }

    #[test]
    fn test_base_uri_without_subdomain_uses_name() {
        let normalized = normalize_regions(&[ServerRegion::new("Mystery", "not-a-url")], false);
        let mystery = normalized.table.get("MYSTERY").unwrap();
        assert_eq!(mystery.short_name.as_deref(), Some("MYSTERY"));
        assert_eq!(mystery.continent, Some(Continent::Other));
    }

    #[test]
    fn test_duplicate_names_keep_last_record() {
        let first = region("EastUS", "old");
        let second = region("EASTUS", "new");
        let normalized = normalize_regions(&[first, second], false);
        assert_eq!(normalized.table.len(), 1);
        assert_eq!(
            normalized.table.get("eastus").unwrap().short_name.as_deref(),
            Some("🇺🇸 NEW")
        );
    }

    #[test]
    fn test_empty_list() {
        let normalized = normalize_regions(&[], true);
        assert!(normalized.table.is_empty());
        assert!(normalized.selected.is_none());
    }
}
