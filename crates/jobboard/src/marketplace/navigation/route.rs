use serde::{Deserialize, Serialize};

use crate::marketplace::domain::{ArticleId, ListingId, OrganizationId};

/// Which screen is active, with only the identifiers needed to resolve it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    #[default]
    Home,
    JobDetail {
        listing_id: ListingId,
    },
    CompanyDetail {
        organization_id: OrganizationId,
    },
    ArticleDetail {
        article_id: ArticleId,
    },
    Login,
    Register,
    MyPage,
    Application {
        listing_id: ListingId,
    },
    CompanyProfile,
    Terms,
    Privacy,
    CompanyLp,
    CompanyLogin,
    CompanyRegister,
    CompanyDashboard {
        organization_id: OrganizationId,
    },
}

/// Audience a route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMode {
    Public,
    Company,
}

impl Route {
    pub fn job(id: impl Into<String>) -> Self {
        Self::JobDetail {
            listing_id: ListingId(id.into()),
        }
    }

    pub fn company(id: impl Into<String>) -> Self {
        Self::CompanyDetail {
            organization_id: OrganizationId(id.into()),
        }
    }

    pub fn article(id: impl Into<String>) -> Self {
        Self::ArticleDetail {
            article_id: ArticleId(id.into()),
        }
    }

    pub const fn mode(&self) -> RouteMode {
        match self {
            Self::CompanyLp
            | Self::CompanyLogin
            | Self::CompanyRegister
            | Self::CompanyDashboard { .. } => RouteMode::Company,
            Self::Home
            | Self::JobDetail { .. }
            | Self::CompanyDetail { .. }
            | Self::ArticleDetail { .. }
            | Self::Login
            | Self::Register
            | Self::MyPage
            | Self::Application { .. }
            | Self::CompanyProfile
            | Self::Terms
            | Self::Privacy => RouteMode::Public,
        }
    }

    pub const fn is_company_mode(&self) -> bool {
        matches!(self.mode(), RouteMode::Company)
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::JobDetail { listing_id } => format!("/jobs/{listing_id}"),
            Self::CompanyDetail { organization_id } => format!("/companies/{organization_id}"),
            Self::ArticleDetail { article_id } => format!("/articles/{article_id}"),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::MyPage => "/mypage".to_string(),
            Self::Application { listing_id } => format!("/jobs/{listing_id}/apply"),
            Self::CompanyProfile => "/profile".to_string(),
            Self::Terms => "/terms".to_string(),
            Self::Privacy => "/privacy".to_string(),
            Self::CompanyLp => "/company".to_string(),
            Self::CompanyLogin => "/company/login".to_string(),
            Self::CompanyRegister => "/company/register".to_string(),
            Self::CompanyDashboard { organization_id } => {
                format!("/company/dashboard/{organization_id}")
            }
        }
    }

    /// Parses a canonical path. Query strings and trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Self::Home,
            ["jobs", id] => Self::job(*id),
            ["jobs", id, "apply"] => Self::Application {
                listing_id: ListingId::new(*id),
            },
            ["companies", id] => Self::company(*id),
            ["articles", id] => Self::article(*id),
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["mypage"] => Self::MyPage,
            ["profile"] => Self::CompanyProfile,
            ["terms"] => Self::Terms,
            ["privacy"] => Self::Privacy,
            ["company"] => Self::CompanyLp,
            ["company", "login"] => Self::CompanyLogin,
            ["company", "register"] => Self::CompanyRegister,
            ["company", "dashboard", id] => Self::CompanyDashboard {
                organization_id: OrganizationId::new(*id),
            },
            _ => return None,
        };
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_route() -> Vec<Route> {
        vec![
            Route::Home,
            Route::job("job-001"),
            Route::company("org-fincore"),
            Route::article("art-001"),
            Route::Login,
            Route::Register,
            Route::MyPage,
            Route::Application {
                listing_id: ListingId::new("job-001"),
            },
            Route::CompanyProfile,
            Route::Terms,
            Route::Privacy,
            Route::CompanyLp,
            Route::CompanyLogin,
            Route::CompanyRegister,
            Route::CompanyDashboard {
                organization_id: OrganizationId::new("org-fincore"),
            },
        ]
    }

    #[test]
    fn every_route_has_a_parseable_path() {
        for route in every_route() {
            assert_eq!(Route::from_path(&route.path()), Some(route.clone()), "{route:?}");
        }
    }

    #[test]
    fn only_company_screens_use_company_mode() {
        let company: Vec<_> = every_route()
            .into_iter()
            .filter(Route::is_company_mode)
            .collect();
        assert_eq!(company.len(), 4);
        assert!(!Route::company("org-fincore").is_company_mode());
    }

    #[test]
    fn from_path_tolerates_trailing_slash_and_query() {
        assert_eq!(Route::from_path("/jobs/job-001/?ref=top"), Some(Route::job("job-001")));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/jobs"), None);
        assert_eq!(Route::from_path("/unknown/page"), None);
    }

    #[test]
    fn routes_serialize_with_route_tag() {
        let value = serde_json::to_value(Route::job("job-001")).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({ "route": "job_detail", "listing_id": "job-001" })
        );
        let parsed: Route =
            serde_json::from_value(serde_json::json!({ "route": "terms" })).expect("parse");
        assert_eq!(parsed, Route::Terms);
    }
}
