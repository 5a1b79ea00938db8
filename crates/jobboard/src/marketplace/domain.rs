use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for organizations posting listings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub String);

/// Identifier wrapper for job listings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

/// Identifier wrapper for editorial articles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub String);

macro_rules! impl_id {
    ($($name:ident),+) => {
        $(
            impl $name {
                pub fn new(value: impl Into<String>) -> Self {
                    Self(value.into())
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }

                /// True when the id can be written as a single URL path segment.
                pub fn is_path_segment(&self) -> bool {
                    is_path_segment(&self.0)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )+
    };
}

impl_id!(OrganizationId, ListingId, ArticleId);

fn is_path_segment(id: &str) -> bool {
    !id.trim().is_empty() && !id.contains(['/', '?', '#'])
}

/// How much of the work can be done away from the office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStyle {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkStyle {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Remote => "フルリモート",
            Self::Hybrid => "一部リモート",
            Self::Onsite => "出社",
        }
    }

    /// Accepts the snake_case key or the display label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "remote" | "フルリモート" => Some(Self::Remote),
            "hybrid" | "一部リモート" => Some(Self::Hybrid),
            "onsite" | "出社" => Some(Self::Onsite),
            _ => None,
        }
    }
}

/// Expected length of the engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLength {
    ShortTerm,
    LongTerm,
}

impl EngagementLength {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShortTerm => "短期",
            Self::LongTerm => "長期",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "short_term" | "短期" => Some(Self::ShortTerm),
            "long_term" | "長期" => Some(Self::LongTerm),
            _ => None,
        }
    }
}

/// Company or team posting opportunities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub industry: String,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u32>,
}

/// One postable opportunity. Listings share their organization rather than owning a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub id: ListingId,
    pub organization: Arc<Organization>,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub skills: Vec<String>,
    pub location: String,
    pub salary: String,
    pub work_style: WorkStyle,
    pub engagement: EngagementLength,
    pub posted_on: NaiveDate,
}

impl Listing {
    pub fn organization_id(&self) -> &OrganizationId {
        &self.organization.id
    }

    pub fn card(&self) -> ListingCard {
        ListingCard {
            id: self.id.clone(),
            title: self.title.clone(),
            organization_id: self.organization.id.clone(),
            organization_name: self.organization.name.clone(),
            location: self.location.clone(),
            salary: self.salary.clone(),
            work_style: self.work_style.label(),
            engagement: self.engagement.label(),
            tags: self.tags.clone(),
            posted_on: self.posted_on,
        }
    }
}

/// Listing shape as stored in catalog documents, referencing its organization by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: ListingId,
    pub organization_id: OrganizationId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub location: String,
    pub salary: String,
    pub work_style: WorkStyle,
    pub engagement: EngagementLength,
    pub posted_on: NaiveDate,
}

impl ListingRecord {
    pub fn attach(self, organization: Arc<Organization>) -> Listing {
        Listing {
            id: self.id,
            organization,
            title: self.title,
            description: self.description,
            tags: self.tags,
            skills: self.skills,
            location: self.location,
            salary: self.salary,
            work_style: self.work_style,
            engagement: self.engagement,
            posted_on: self.posted_on,
        }
    }
}

/// Compact projection shown in result lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingCard {
    pub id: ListingId,
    pub title: String,
    pub organization_id: OrganizationId,
    pub organization_name: String,
    pub location: String,
    pub salary: String,
    pub work_style: &'static str,
    pub engagement: &'static str,
    pub tags: Vec<String>,
    pub posted_on: NaiveDate,
}

/// Editorial content shown on the home page and article pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub summary: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_on: NaiveDate,
}
