use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::domain::{ListingId, OrganizationId};

/// Longest motivation statement accepted, in characters.
pub const MOTIVATION_MAX_CHARS: usize = 2000;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

/// How the company can reach the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantContact {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<u16>,
}

/// Student provided payload for applying to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub listing_id: ListingId,
    pub applicant: ApplicantContact,
    pub motivation: String,
}

impl ApplicationSubmission {
    pub fn validate(&self) -> Result<(), ApplicationValidationError> {
        if self.applicant.name.trim().is_empty() {
            return Err(ApplicationValidationError::BlankName);
        }
        if !is_plausible_email(&self.applicant.email) {
            return Err(ApplicationValidationError::InvalidEmail(
                self.applicant.email.clone(),
            ));
        }
        if self.motivation.trim().is_empty() {
            return Err(ApplicationValidationError::BlankMotivation);
        }
        let length = self.motivation.chars().count();
        if length > MOTIVATION_MAX_CHARS {
            return Err(ApplicationValidationError::MotivationTooLong {
                length,
                max: MOTIVATION_MAX_CHARS,
            });
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.trim().split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

/// Reasons a submission is rejected before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationValidationError {
    #[error("applicant name is required")]
    BlankName,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("motivation statement is required")]
    BlankMotivation,
    #[error("motivation statement is {length} characters; at most {max} are allowed")]
    MotivationTooLong { length: usize, max: usize },
}

/// Review lifecycle of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    Reviewing,
    Accepted,
    Declined,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Reviewing => "reviewing",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Declined)
    }

    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                Self::Submitted,
                Self::Reviewing | Self::Accepted | Self::Declined
            ) | (Self::Reviewing, Self::Accepted | Self::Declined)
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stored application, denormalized with the listing's owner for dashboard queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub listing_id: ListingId,
    pub listing_title: String,
    pub organization_id: OrganizationId,
    pub applicant: ApplicantContact,
    pub motivation: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.id.clone(),
            listing_id: self.listing_id.clone(),
            listing_title: self.listing_title.clone(),
            status: self.status.label(),
            submitted_at: self.submitted_at,
        }
    }
}

/// Representation returned to the applicant; omits the motivation and contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub listing_id: ListingId,
    pub listing_title: String,
    pub status: &'static str,
    pub submitted_at: DateTime<Utc>,
}
