use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSubmission,
    ApplicationValidationError,
};
use super::repository::{
    ApplicationNotifier, ApplicationRepository, CompanyNotification, RepositoryError,
};
use crate::marketplace::catalog::{CatalogError, ListingCatalog};
use crate::marketplace::domain::{ListingId, OrganizationId};

/// Service composing the listing catalog, application storage, and company notifications.
pub struct ApplicationService<C, R, N> {
    catalog: Arc<C>,
    repository: Arc<R>,
    notifier: Arc<N>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<C, R, N> ApplicationService<C, R, N>
where
    C: ListingCatalog + 'static,
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    pub fn new(catalog: Arc<C>, repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            catalog,
            repository,
            notifier,
        }
    }

    /// Validate and store a new application, then tell the owning company.
    ///
    /// A failed notification is logged and does not undo the stored application.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        submission.validate()?;

        let listing = self
            .catalog
            .listing(&submission.listing_id)?
            .ok_or_else(|| {
                ApplicationServiceError::UnknownListing(submission.listing_id.clone())
            })?;

        let now = Utc::now();
        let record = ApplicationRecord {
            id: next_application_id(),
            listing_id: listing.id.clone(),
            listing_title: listing.title.clone(),
            organization_id: listing.organization_id().clone(),
            applicant: submission.applicant,
            motivation: submission.motivation,
            status: ApplicationStatus::Submitted,
            submitted_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        info!(
            application_id = %stored.id.0,
            listing_id = %stored.listing_id,
            "application submitted"
        );

        let mut details = BTreeMap::new();
        details.insert("listing_id".to_string(), stored.listing_id.0.clone());
        details.insert("listing_title".to_string(), stored.listing_title.clone());
        let notification = CompanyNotification {
            template: "application_received".to_string(),
            organization_id: stored.organization_id.clone(),
            application_id: stored.id.clone(),
            details,
        };
        if let Err(err) = self.notifier.notify(notification) {
            warn!(application_id = %stored.id.0, error = %err, "company notification failed");
        }

        Ok(stored)
    }

    /// Fetch an application and current status for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Applications received by an organization, oldest first.
    pub fn for_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        let mut records = self.repository.for_organization(organization_id)?;
        records.sort_by(|a, b| {
            a.submitted_at
                .cmp(&b.submitted_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        Ok(records)
    }

    /// Move an application through its review lifecycle.
    pub fn transition(
        &self,
        application_id: &ApplicationId,
        next: ApplicationStatus,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let mut record = self.get(application_id)?;
        if !record.status.can_transition_to(next) {
            return Err(ApplicationServiceError::InvalidTransition {
                from: record.status,
                to: next,
            });
        }

        let previous = record.status;
        record.status = next;
        record.updated_at = Utc::now();
        self.repository.update_if(record.clone(), previous)?;
        info!(application_id = %record.id.0, status = %next, "application status changed");
        Ok(record)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Validation(#[from] ApplicationValidationError),
    #[error("listing {0} does not exist")]
    UnknownListing(ListingId),
    #[error("cannot move application from {from} to {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
