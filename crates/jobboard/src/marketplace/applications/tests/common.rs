use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::marketplace::applications::domain::{
    ApplicantContact, ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSubmission,
};
use crate::marketplace::applications::repository::{
    ApplicationNotifier, ApplicationRepository, CompanyNotification, NotifyError,
    RepositoryError,
};
use crate::marketplace::applications::{application_router, ApplicationService};
use crate::marketplace::catalog::InMemoryCatalog;
use crate::marketplace::domain::{ListingId, OrganizationId};

pub(super) type TestService = ApplicationService<InMemoryCatalog, MemoryRepository, MemoryNotifier>;

pub(super) fn submission() -> ApplicationSubmission {
    ApplicationSubmission {
        listing_id: ListingId::new("job-001"),
        applicant: ApplicantContact {
            name: "山田 花子".to_string(),
            email: "hanako@example.ac.jp".to_string(),
            university: Some("東京大学".to_string()),
            graduation_year: Some(2027),
        },
        motivation: "Goでのバックエンド開発に挑戦したいです。".to_string(),
    }
}

pub(super) fn build_service() -> (TestService, Arc<MemoryRepository>, Arc<MemoryNotifier>) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = ApplicationService::new(
        Arc::new(InMemoryCatalog::sample()),
        repository.clone(),
        notifier.clone(),
    );
    (service, repository, notifier)
}

pub(super) fn application_router_with_service(service: TestService) -> axum::Router {
    application_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<ApplicationId, ApplicationRecord>>,
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update_if(
        &self,
        record: ApplicationRecord,
        expected: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        match guard.get_mut(&record.id) {
            Some(existing) if existing.status == expected => {
                *existing = record;
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }

    fn for_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|record| &record.organization_id == organization_id)
            .cloned()
            .collect())
    }
}

/// Serves a frozen copy of one record from `fetch` while writes reach the inner store.
#[derive(Default)]
pub(super) struct StaleReadRepository {
    inner: MemoryRepository,
    snapshot: Mutex<Option<ApplicationRecord>>,
}

impl StaleReadRepository {
    pub(super) fn freeze(&self, record: ApplicationRecord) {
        *self.snapshot.lock().unwrap() = Some(record);
    }

    pub(super) fn stored(&self, id: &ApplicationId) -> Option<ApplicationRecord> {
        self.inner.fetch(id).unwrap()
    }
}

impl ApplicationRepository for StaleReadRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update_if(
        &self,
        record: ApplicationRecord,
        expected: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        self.inner.update_if(record, expected)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        match self.snapshot.lock().unwrap().as_ref() {
            Some(snapshot) if &snapshot.id == id => Ok(Some(snapshot.clone())),
            _ => self.inner.fetch(id),
        }
    }

    fn for_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.for_organization(organization_id)
    }
}

pub(super) fn build_stale_service() -> (
    ApplicationService<InMemoryCatalog, StaleReadRepository, MemoryNotifier>,
    Arc<StaleReadRepository>,
) {
    let repository = Arc::new(StaleReadRepository::default());
    let service = ApplicationService::new(
        Arc::new(InMemoryCatalog::sample()),
        repository.clone(),
        Arc::new(MemoryNotifier::default()),
    );
    (service, repository)
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn update_if(
        &self,
        _record: ApplicationRecord,
        _expected: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn for_organization(
        &self,
        _organization_id: &OrganizationId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    events: Mutex<Vec<CompanyNotification>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<CompanyNotification> {
        self.events.lock().unwrap().clone()
    }
}

impl ApplicationNotifier for MemoryNotifier {
    fn notify(&self, notification: CompanyNotification) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(notification);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl ApplicationNotifier for FailingNotifier {
    fn notify(&self, _notification: CompanyNotification) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp down".to_string()))
    }
}
