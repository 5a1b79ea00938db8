//! Student application intake and company-side review.

pub mod domain;
pub mod repository;
mod router;
mod service;

pub use domain::{
    ApplicantContact, ApplicationId, ApplicationRecord, ApplicationStatus,
    ApplicationStatusView, ApplicationSubmission, ApplicationValidationError,
    MOTIVATION_MAX_CHARS,
};
pub use repository::{
    ApplicationNotifier, ApplicationRepository, CompanyNotification, NotifyError,
    RepositoryError,
};
pub use router::{application_router, StatusUpdate};
pub use service::{ApplicationService, ApplicationServiceError};

#[cfg(test)]
mod tests;
