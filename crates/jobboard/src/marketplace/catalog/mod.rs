//! Read-side data provider for listings, organizations, and articles.
//!
//! Filtering and page resolution only ever talk to [`ListingCatalog`], so the in-memory
//! catalog can be swapped for a real backing store without touching either.

mod import;
mod seed;

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{
    Article, ArticleId, Listing, ListingId, ListingRecord, Organization, OrganizationId,
};

pub use import::{ListingCsvImporter, ListingImportError};

/// Storage abstraction consumed by the filter engine and the page resolver.
pub trait ListingCatalog: Send + Sync {
    fn listings(&self) -> Result<Vec<Listing>, CatalogError>;
    fn listing(&self, id: &ListingId) -> Result<Option<Listing>, CatalogError>;
    fn organizations(&self) -> Result<Vec<Arc<Organization>>, CatalogError>;
    fn organization(&self, id: &OrganizationId)
        -> Result<Option<Arc<Organization>>, CatalogError>;
    fn articles(&self) -> Result<Vec<Article>, CatalogError>;
    fn article(&self, id: &ArticleId) -> Result<Option<Article>, CatalogError>;

    fn listings_for_organization(
        &self,
        id: &OrganizationId,
    ) -> Result<Vec<Listing>, CatalogError> {
        Ok(self
            .listings()?
            .into_iter()
            .filter(|listing| listing.organization_id() == id)
            .collect())
    }
}

/// Error enumeration for catalog construction and lookups.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("listing {listing} references unknown organization {organization}")]
    UnknownOrganization {
        listing: ListingId,
        organization: OrganizationId,
    },
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("{kind} id '{id}' cannot be used in a page path")]
    InvalidId { kind: &'static str, id: String },
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Serialized catalog layout, with listings referencing organizations by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub listings: Vec<ListingRecord>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Entity counts reported after loading or importing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub organizations: usize,
    pub listings: usize,
    pub articles: usize,
}

/// Catalog held entirely in memory. Iteration order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    organizations: Vec<Arc<Organization>>,
    listings: Vec<Listing>,
    articles: Vec<Article>,
}

impl InMemoryCatalog {
    /// The bundled demo dataset.
    pub fn sample() -> Self {
        Self::from_document(seed::sample_document())
            .unwrap_or_else(|err| panic!("bundled sample catalog is invalid: {err}"))
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let CatalogDocument {
            organizations,
            listings,
            articles,
        } = document;

        ensure_valid_ids(
            "organization",
            organizations.iter().map(|org| &org.id),
            OrganizationId::is_path_segment,
        )?;
        ensure_valid_ids(
            "listing",
            listings.iter().map(|listing| &listing.id),
            ListingId::is_path_segment,
        )?;
        ensure_valid_ids(
            "article",
            articles.iter().map(|article| &article.id),
            ArticleId::is_path_segment,
        )?;

        let organizations: Vec<Arc<Organization>> =
            organizations.into_iter().map(Arc::new).collect();
        let by_id: HashMap<&OrganizationId, &Arc<Organization>> =
            organizations.iter().map(|org| (&org.id, org)).collect();

        let listings = listings
            .into_iter()
            .map(|record| match by_id.get(&record.organization_id) {
                Some(organization) => Ok(record.attach(Arc::clone(organization))),
                None => Err(CatalogError::UnknownOrganization {
                    listing: record.id,
                    organization: record.organization_id,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Self {
            organizations,
            listings,
            articles,
        };
        debug!(summary = ?catalog.summary(), "catalog constructed");
        Ok(catalog)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    /// Appends listings, rejecting ids that already exist or cannot appear in a path.
    pub fn with_listings(mut self, listings: Vec<Listing>) -> Result<Self, CatalogError> {
        let mut seen: HashSet<ListingId> =
            self.listings.iter().map(|listing| listing.id.clone()).collect();
        for listing in &listings {
            if !listing.id.is_path_segment() {
                return Err(CatalogError::InvalidId {
                    kind: "listing",
                    id: listing.id.0.clone(),
                });
            }
            if !seen.insert(listing.id.clone()) {
                return Err(CatalogError::DuplicateId {
                    kind: "listing",
                    id: listing.id.0.clone(),
                });
            }
        }
        self.listings.extend(listings);
        Ok(self)
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            organizations: self.organizations.len(),
            listings: self.listings.len(),
            articles: self.articles.len(),
        }
    }
}

impl ListingCatalog for InMemoryCatalog {
    fn listings(&self) -> Result<Vec<Listing>, CatalogError> {
        Ok(self.listings.clone())
    }

    fn listing(&self, id: &ListingId) -> Result<Option<Listing>, CatalogError> {
        Ok(self.listings.iter().find(|listing| &listing.id == id).cloned())
    }

    fn organizations(&self) -> Result<Vec<Arc<Organization>>, CatalogError> {
        Ok(self.organizations.clone())
    }

    fn organization(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Arc<Organization>>, CatalogError> {
        Ok(self.organizations.iter().find(|org| &org.id == id).cloned())
    }

    fn articles(&self) -> Result<Vec<Article>, CatalogError> {
        Ok(self.articles.clone())
    }

    fn article(&self, id: &ArticleId) -> Result<Option<Article>, CatalogError> {
        Ok(self.articles.iter().find(|article| &article.id == id).cloned())
    }
}

/// Ids must be unique and usable as a path segment so every route back to them resolves.
fn ensure_valid_ids<'a, T>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a T>,
    is_path_segment: fn(&T) -> bool,
) -> Result<(), CatalogError>
where
    T: Eq + std::hash::Hash + std::fmt::Display + 'a,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !is_path_segment(id) {
            return Err(CatalogError::InvalidId {
                kind,
                id: id.to_string(),
            });
        }
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
