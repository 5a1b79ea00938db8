use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::info;

use super::{CatalogError, InMemoryCatalog, ListingCatalog};
use crate::marketplace::domain::{
    EngagementLength, Listing, ListingId, ListingRecord, OrganizationId, WorkStyle,
};

#[derive(Debug)]
pub enum ListingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownOrganization {
        row: usize,
        organization: String,
    },
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
    Catalog(CatalogError),
}

impl std::fmt::Display for ListingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingImportError::Io(err) => write!(f, "failed to read listing export: {}", err),
            ListingImportError::Csv(err) => write!(f, "invalid listing CSV data: {}", err),
            ListingImportError::UnknownOrganization { row, organization } => write!(
                f,
                "row {}: organization '{}' is not in the catalog",
                row, organization
            ),
            ListingImportError::InvalidField { row, field, value } => {
                write!(f, "row {}: invalid {} '{}'", row, field, value)
            }
            ListingImportError::Catalog(err) => {
                write!(f, "could not merge imported listings: {}", err)
            }
        }
    }
}

impl std::error::Error for ListingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingImportError::Io(err) => Some(err),
            ListingImportError::Csv(err) => Some(err),
            ListingImportError::Catalog(err) => Some(err),
            ListingImportError::UnknownOrganization { .. }
            | ListingImportError::InvalidField { .. } => None,
        }
    }
}

impl From<std::io::Error> for ListingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ListingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<CatalogError> for ListingImportError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

/// Reads admin listing exports and resolves them against an existing catalog.
pub struct ListingCsvImporter;

impl ListingCsvImporter {
    pub fn from_path<P: AsRef<Path>, C: ListingCatalog + ?Sized>(
        path: P,
        catalog: &C,
    ) -> Result<Vec<Listing>, ListingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    pub fn from_reader<R: Read, C: ListingCatalog + ?Sized>(
        reader: R,
        catalog: &C,
    ) -> Result<Vec<Listing>, ListingImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut listings = Vec::new();

        for (index, row) in csv_reader.deserialize::<ListingRow>().enumerate() {
            // header occupies line 1
            let line = index + 2;
            let row = row?;
            let record = row.into_record(line)?;
            let organization = catalog.organization(&record.organization_id)?.ok_or_else(|| {
                ListingImportError::UnknownOrganization {
                    row: line,
                    organization: record.organization_id.0.clone(),
                }
            })?;
            listings.push(record.attach(organization));
        }

        Ok(listings)
    }

    /// Imports a CSV and appends the listings to `catalog`.
    pub fn merge<R: Read>(
        reader: R,
        catalog: InMemoryCatalog,
    ) -> Result<InMemoryCatalog, ListingImportError> {
        let listings = Self::from_reader(reader, &catalog)?;
        let imported = listings.len();
        let catalog = catalog.with_listings(listings)?;
        info!(imported, total = catalog.summary().listings, "merged listing import");
        Ok(catalog)
    }
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    id: String,
    organization_id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, deserialize_with = "semicolon_list")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "semicolon_list")]
    skills: Vec<String>,
    location: String,
    salary: String,
    work_style: String,
    engagement: String,
    posted_on: String,
}

impl ListingRow {
    fn into_record(self, row: usize) -> Result<ListingRecord, ListingImportError> {
        let work_style =
            WorkStyle::parse(&self.work_style).ok_or(ListingImportError::InvalidField {
                row,
                field: "work_style",
                value: self.work_style.clone(),
            })?;
        let engagement = EngagementLength::parse(&self.engagement).ok_or(
            ListingImportError::InvalidField {
                row,
                field: "engagement",
                value: self.engagement.clone(),
            },
        )?;
        let posted_on = NaiveDate::parse_from_str(self.posted_on.trim(), "%Y-%m-%d").map_err(
            |_| ListingImportError::InvalidField {
                row,
                field: "posted_on",
                value: self.posted_on.clone(),
            },
        )?;
        let id = ListingId(self.id);
        if !id.is_path_segment() {
            return Err(ListingImportError::InvalidField {
                row,
                field: "id",
                value: id.0,
            });
        }

        Ok(ListingRecord {
            id,
            organization_id: OrganizationId(self.organization_id),
            title: self.title,
            description: self.description,
            tags: self.tags,
            skills: self.skills,
            location: self.location,
            salary: self.salary,
            work_style,
            engagement,
            posted_on,
        })
    }
}

fn semicolon_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect())
}
