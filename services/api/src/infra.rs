use jobboard::config::CatalogConfig;
use jobboard::error::AppError;
use jobboard::marketplace::applications::{
    ApplicationId, ApplicationNotifier, ApplicationRecord, ApplicationRepository,
    ApplicationStatus, CompanyNotification, NotifyError, RepositoryError,
};
use jobboard::marketplace::catalog::{InMemoryCatalog, ListingCsvImporter};
use jobboard::marketplace::domain::OrganizationId;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::fs::File;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl InMemoryApplicationRepository {
    fn records(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<ApplicationId, ApplicationRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records()?;
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
        let mut guard = self.records()?;
        let existing = guard.get_mut(&record.id).ok_or(RepositoryError::NotFound)?;
        if existing.status != expected {
            return Err(RepositoryError::Conflict);
        }
        *existing = record;
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self.records()?.get(id).cloned())
    }

    fn for_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self
            .records()?
            .values()
            .filter(|record| &record.organization_id == organization_id)
            .cloned()
            .collect())
    }
}

/// Records company notifications and writes them to the log.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCompanyNotifier {
    events: Arc<Mutex<Vec<CompanyNotification>>>,
}

impl ApplicationNotifier for InMemoryCompanyNotifier {
    fn notify(&self, notification: CompanyNotification) -> Result<(), NotifyError> {
        info!(
            template = %notification.template,
            organization_id = %notification.organization_id,
            application_id = %notification.application_id.0,
            "company notified"
        );
        let mut guard = self
            .events
            .lock()
            .map_err(|_| NotifyError::Transport("notifier mutex poisoned".to_string()))?;
        guard.push(notification);
        Ok(())
    }
}

impl InMemoryCompanyNotifier {
    #[cfg(test)]
    pub(crate) fn events(&self) -> Vec<CompanyNotification> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

/// Builds the catalog from the configured JSON document (or the sample data), then merges
/// the optional CSV listing export on top.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<InMemoryCatalog, AppError> {
    let catalog = match &config.path {
        Some(path) => {
            info!(path = %path.display(), "loading catalog document");
            InMemoryCatalog::from_path(path)?
        }
        None => InMemoryCatalog::sample(),
    };

    let catalog = match &config.listings_csv {
        Some(path) => {
            info!(path = %path.display(), "merging listing csv");
            ListingCsvImporter::merge(File::open(path)?, catalog)?
        }
        None => catalog,
    };

    let summary = catalog.summary();
    info!(
        organizations = summary.organizations,
        listings = summary.listings,
        articles = summary.articles,
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard::marketplace::applications::{
        ApplicantContact, ApplicationService, ApplicationStatus, ApplicationSubmission,
    };
    use jobboard::marketplace::catalog::ListingCatalog;
    use jobboard::marketplace::domain::ListingId;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        let mut file = File::create(&path).expect("create csv");
        file.write_all(contents.as_bytes()).expect("write csv");
        path
    }

    #[test]
    fn load_catalog_defaults_to_sample() {
        let catalog = load_catalog(&CatalogConfig::default()).expect("sample loads");
        assert_eq!(catalog.summary(), InMemoryCatalog::sample().summary());
    }

    #[test]
    fn load_catalog_merges_listing_csv() {
        let path = temp_csv(
            "listings.csv",
            "id,organization_id,title,description,tags,skills,location,salary,work_style,engagement,posted_on\n\
             job-101,org-cloudbridge,SREインターン,監視基盤の運用,エンジニア;インフラ,Go;Kubernetes,東京都渋谷区,\"時給 1,700円\",remote,long_term,2025-04-10\n",
        );
        let config = CatalogConfig {
            path: None,
            listings_csv: Some(path.clone()),
        };

        let catalog = load_catalog(&config).expect("csv merges");
        let _ = std::fs::remove_file(path);

        let listing = catalog
            .listing(&ListingId::new("job-101"))
            .expect("lookup")
            .expect("imported listing present");
        assert_eq!(listing.organization.name, "株式会社クラウドブリッジ");
        assert_eq!(
            catalog.summary().listings,
            InMemoryCatalog::sample().summary().listings + 1
        );
    }

    #[test]
    fn load_catalog_reports_missing_document() {
        let config = CatalogConfig {
            path: Some(PathBuf::from("/nonexistent/catalog.json")),
            listings_csv: None,
        };
        let err = load_catalog(&config).expect_err("missing file fails");
        assert!(matches!(err, AppError::Catalog(_)));
    }

    fn submission() -> ApplicationSubmission {
        ApplicationSubmission {
            listing_id: ListingId::new("job-007"),
            applicant: ApplicantContact {
                name: "佐藤 太郎".to_string(),
                email: "taro@example.ac.jp".to_string(),
                university: None,
                graduation_year: Some(2026),
            },
            motivation: "Rustで決済基盤を作りたいです。".to_string(),
        }
    }

    #[test]
    fn in_memory_adapters_back_the_application_service() {
        let repository = Arc::new(InMemoryApplicationRepository::default());
        let notifier = Arc::new(InMemoryCompanyNotifier::default());
        let service = ApplicationService::new(
            Arc::new(InMemoryCatalog::sample()),
            repository.clone(),
            notifier.clone(),
        );

        let record = service.submit(submission()).expect("submission stored");

        assert_eq!(record.organization_id, OrganizationId::new("org-fincore"));
        assert_eq!(notifier.events().len(), 1);

        let reviewed = service
            .transition(&record.id, ApplicationStatus::Reviewing)
            .expect("transition");
        assert_eq!(
            repository.fetch(&record.id).expect("fetch"),
            Some(reviewed)
        );
        assert_eq!(
            repository
                .for_organization(&OrganizationId::new("org-fincore"))
                .expect("list")
                .len(),
            1
        );
    }

    #[test]
    fn update_if_rejects_writes_based_on_a_stale_status() {
        let repository = Arc::new(InMemoryApplicationRepository::default());
        let service = ApplicationService::new(
            Arc::new(InMemoryCatalog::sample()),
            repository.clone(),
            Arc::new(InMemoryCompanyNotifier::default()),
        );
        let submitted = service.submit(submission()).expect("submission stored");
        service
            .transition(&submitted.id, ApplicationStatus::Accepted)
            .expect("accepted");

        let mut declined = submitted.clone();
        declined.status = ApplicationStatus::Declined;
        let err = repository
            .update_if(declined.clone(), ApplicationStatus::Submitted)
            .expect_err("stale write");
        assert!(matches!(err, RepositoryError::Conflict));
        let stored = repository
            .fetch(&submitted.id)
            .expect("fetch")
            .expect("stored");
        assert_eq!(stored.status, ApplicationStatus::Accepted);

        declined.id = ApplicationId("app-missing".to_string());
        let err = repository
            .update_if(declined, ApplicationStatus::Accepted)
            .expect_err("missing record");
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
