//! Region catalog: immutable region storage and name lookup
//!
//! Regions are created once from the upstream data source at startup and
//! never change afterwards. Each region gets a dense index id in catalog
//! order, which the adjacency graph and path search use directly as an
//! array index.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense index of a region, assigned once in catalog order at load.
pub type RegionId = usize;

/// A closed polygon boundary ring, kept exactly as supplied upstream.
///
/// Points stay as raw coordinate arrays so that malformed entries survive
/// until the adjacency builder inspects them edge by edge. Filtering them
/// out earlier would join the neighbors of a dropped point with an edge the
/// source data never contained.
pub type Ring = Vec<Vec<f64>>;

/// One raw catalog entry in the upstream data contract.
///
/// The JSON shape (`name`, `name_en`, `polygons` as a list of rings of
/// `[lon, lat]` pairs) is fixed by the data source, not designed here.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionEntry {
    /// Native display name
    pub name: String,
    /// Transliterated display name
    pub name_en: String,
    /// Boundary rings (outer rings and holes, flattened)
    pub polygons: Vec<Ring>,
}

/// A polygon-bounded area with a stable identity and display names.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    id: RegionId,
    name: String,
    name_en: String,
    polygons: Vec<Ring>,
}

impl Region {
    #[inline]
    pub fn id(&self) -> RegionId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn name_en(&self) -> &str {
        &self.name_en
    }

    #[inline]
    pub fn polygons(&self) -> &[Ring] {
        &self.polygons
    }

    /// Combined display name, `"{name} ({name_en})"`.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.name_en)
    }
}

/// Immutable set of all regions, with id and name lookup.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionCatalog {
    regions: Vec<Region>,
    /// Lowercased exact aliases (name, transliterated name, display name)
    by_alias: HashMap<String, RegionId>,
}

impl RegionCatalog {
    /// Build the catalog from raw entries, assigning ids in entry order.
    pub fn from_entries(entries: Vec<RegionEntry>) -> Self {
        let regions: Vec<Region> = entries
            .into_iter()
            .enumerate()
            .map(|(id, entry)| Region {
                id,
                name: entry.name,
                name_en: entry.name_en,
                polygons: entry.polygons,
            })
            .collect();

        let mut by_alias = HashMap::new();
        for region in &regions {
            by_alias.insert(region.name.to_lowercase(), region.id);
            by_alias.insert(region.name_en.to_lowercase(), region.id);
            by_alias.insert(region.display_name().to_lowercase(), region.id);
        }

        Self { regions, by_alias }
    }

    #[inline]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// All regions in id order.
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Resolve a player-typed region name to an id.
    ///
    /// Exact (case-insensitive) alias matches win. Otherwise the input is
    /// normalized with [`normalize_for_search`] and matched as a substring
    /// against every region's normalized aliases; the match must be unique,
    /// an ambiguous query resolves to `None`.
    pub fn resolve(&self, input: &str) -> Option<RegionId> {
        if let Some(&id) = self.by_alias.get(&input.to_lowercase()) {
            return Some(id);
        }

        let query = normalize_for_search(input);
        if query.is_empty() {
            return None;
        }

        let mut found: Option<RegionId> = None;
        for region in &self.regions {
            let matched = normalize_for_search(region.name()).contains(&query)
                || normalize_for_search(region.name_en()).contains(&query)
                || normalize_for_search(&region.display_name()).contains(&query);
            if matched {
                if found.is_some() {
                    return None;
                }
                found = Some(region.id);
            }
        }

        found
    }
}

/// Fold a display name for fuzzy matching: Unicode NFD with combining marks
/// stripped, runs of non-alphanumeric characters collapsed to a single
/// space, lowercased and trimmed.
///
/// `"Zürich"` folds to `"zurich"` and `"Naxçıvan"` to `"naxcıvan"`. Letters
/// without a combining-mark decomposition (ə, ı, ł) survive the fold, so a
/// query only matches them when typed the same way.
pub fn normalize_for_search(value: &str) -> String {
    use unicode_normalization::UnicodeNormalization;

    let mut out = String::with_capacity(value.len());
    for c in value
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
    {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, name_en: &str) -> RegionEntry {
        RegionEntry {
            name: name.to_string(),
            name_en: name_en.to_string(),
            polygons: Vec::new(),
        }
    }

    fn test_catalog() -> RegionCatalog {
        RegionCatalog::from_entries(vec![
            entry("Bakı", "Baku"),
            entry("Gəncə", "Ganja"),
            entry("Naxçıvan", "Nakhchivan"),
            entry("Şəki", "Shaki"),
        ])
    }

    #[test]
    fn test_ids_follow_entry_order() {
        let catalog = test_catalog();
        assert_eq!(catalog.len(), 4);
        for (index, region) in catalog.iter().enumerate() {
            assert_eq!(region.id(), index);
        }
        assert_eq!(catalog.get(1).unwrap().name_en(), "Ganja");
        assert!(catalog.get(4).is_none());
    }

    #[test]
    fn test_display_name() {
        let catalog = test_catalog();
        assert_eq!(catalog.get(0).unwrap().display_name(), "Bakı (Baku)");
    }

    #[test]
    fn test_resolve_exact_is_case_insensitive() {
        let catalog = test_catalog();
        assert_eq!(catalog.resolve("Bakı"), Some(0));
        assert_eq!(catalog.resolve("BAKU"), Some(0));
        assert_eq!(catalog.resolve("gəncə (ganja)"), Some(1));
    }

    #[test]
    fn test_resolve_folds_decomposable_diacritics() {
        let catalog = test_catalog();
        // ç folds to c, so a plain-ascii prefix of the native name matches
        assert_eq!(catalog.resolve("naxc"), Some(2));
        assert_eq!(catalog.resolve("shak"), Some(3));
    }

    #[test]
    fn test_resolve_substring_must_be_unique() {
        let catalog = test_catalog();
        // "akı"/"aku" appears only in Bakı/Baku
        assert_eq!(catalog.resolve("aku"), Some(0));
        // "an" matches Naxçıvan and Ganja
        assert_eq!(catalog.resolve("an"), None);
    }

    #[test]
    fn test_resolve_rejects_unknown_and_empty() {
        let catalog = test_catalog();
        assert_eq!(catalog.resolve("Atlantis"), None);
        assert_eq!(catalog.resolve(""), None);
        assert_eq!(catalog.resolve("  ... "), None);
    }

    #[test]
    fn test_normalize_for_search() {
        assert_eq!(normalize_for_search("Zürich"), "zurich");
        assert_eq!(normalize_for_search("  Bakı -- City "), "bakı city");
        // Ş decomposes to S plus a combining cedilla; ə does not decompose
        assert_eq!(normalize_for_search("Şəki (Shaki)"), "səki shaki");
        assert_eq!(normalize_for_search("..."), "");
    }
}
