//! Faceted listing search.
//!
//! Occupation, language, industry, and area facets match when ANY selected value matches.
//! The characteristic facet requires ALL selected values to match.

mod characteristic;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{Listing, WorkStyle};

pub use characteristic::{hourly_wage, Characteristic};

/// Area value that selects fully remote listings instead of a location.
pub const FULLY_REMOTE_AREA: &str = "フルリモート";

/// One independent filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Occupation,
    Language,
    Industry,
    Area,
    Characteristic,
}

impl Facet {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Occupation,
            Self::Language,
            Self::Industry,
            Self::Area,
            Self::Characteristic,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Occupation => "職種",
            Self::Language => "言語",
            Self::Industry => "業界",
            Self::Area => "エリア",
            Self::Characteristic => "特徴",
        }
    }
}

/// Search text plus the selected values of every facet.
///
/// Values are replaced wholesale: every builder method consumes the selection and returns
/// a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub query: String,
    pub occupations: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub industries: BTreeSet<String>,
    pub areas: BTreeSet<String>,
    pub characteristics: BTreeSet<String>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && Facet::ordered()
                .into_iter()
                .all(|facet| self.values(facet).is_empty())
    }

    pub fn values(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Occupation => &self.occupations,
            Facet::Language => &self.languages,
            Facet::Industry => &self.industries,
            Facet::Area => &self.areas,
            Facet::Characteristic => &self.characteristics,
        }
    }

    fn values_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Occupation => &mut self.occupations,
            Facet::Language => &mut self.languages,
            Facet::Industry => &mut self.industries,
            Facet::Area => &mut self.areas,
            Facet::Characteristic => &mut self.characteristics,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_value(mut self, facet: Facet, value: impl Into<String>) -> Self {
        if let Some(value) = normalized(value.into()) {
            self.values_mut(facet).insert(value);
        }
        self
    }

    pub fn with_values<I, S>(mut self, facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.values_mut(facet) = values
            .into_iter()
            .filter_map(|value| normalized(value.into()))
            .collect();
        self
    }

    /// Adds `value` when absent, removes it when present.
    pub fn toggled(mut self, facet: Facet, value: impl Into<String>) -> Self {
        if let Some(value) = normalized(value.into()) {
            let set = self.values_mut(facet);
            if !set.remove(&value) {
                set.insert(value);
            }
        }
        self
    }

    /// Decides whether `listing` should be shown under this selection.
    pub fn matches(&self, listing: &Listing) -> bool {
        matches(listing, self)
    }
}

/// Pure predicate: true when `listing` satisfies the query and every facet.
pub fn matches(listing: &Listing, selection: &FilterSelection) -> bool {
    query_matches(listing, &selection.query)
        && any_value(&selection.occupations, |value| occupation_matches(listing, value))
        && any_value(&selection.languages, |value| language_matches(listing, value))
        && any_value(&selection.industries, |value| industry_matches(listing, value))
        && any_value(&selection.areas, |value| area_matches(listing, value))
        && selection
            .characteristics
            .iter()
            .all(|label| Characteristic::parse(label).matches(listing))
}

/// Listings satisfying `selection`, in their original order.
pub fn filter_listings<'a>(
    listings: &'a [Listing],
    selection: &FilterSelection,
) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|listing| matches(listing, selection))
        .collect()
}

/// Facet values are stored trimmed; blank values are dropped.
fn normalized(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn any_value(values: &BTreeSet<String>, mut rule: impl FnMut(&str) -> bool) -> bool {
    values.is_empty() || values.iter().any(|value| rule(value.as_str()))
}

fn query_matches(listing: &Listing, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(&listing.title)
        || contains(&listing.organization.name)
        || contains(&listing.description)
        || listing.tags.iter().any(|tag| contains(tag))
}

fn occupation_matches(listing: &Listing, value: &str) -> bool {
    listing.title.contains(value)
        || listing
            .tags
            .iter()
            .any(|tag| tag == value || tag.contains(value))
}

fn language_matches(listing: &Listing, value: &str) -> bool {
    let value = value.to_lowercase();
    listing
        .tags
        .iter()
        .chain(listing.skills.iter())
        .map(|term| term.to_lowercase())
        .any(|term| term == value || term.contains(&value))
}

fn industry_matches(listing: &Listing, value: &str) -> bool {
    listing.organization.industry.contains(value) || listing.description.contains(value)
}

fn area_matches(listing: &Listing, value: &str) -> bool {
    if value == FULLY_REMOTE_AREA {
        return listing.work_style == WorkStyle::Remote;
    }
    listing.location.contains(value) || listing.organization.location.contains(value)
}
