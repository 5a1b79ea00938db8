use std::sync::Arc;

use serde::Serialize;

use super::route::{Route, RouteMode};
use super::state::BrowseState;
use crate::marketplace::catalog::{CatalogError, ListingCatalog};
use crate::marketplace::domain::{Article, Listing, ListingCard, Organization};
use crate::marketplace::filter::{filter_listings, FilterSelection};

const LATEST_ARTICLES: usize = 3;
const RELATED_LISTINGS: usize = 3;

/// Page frame. Company-mode screens never show the public header and footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chrome {
    Public,
    Company,
}

impl From<RouteMode> for Chrome {
    fn from(mode: RouteMode) -> Self {
        match mode {
            RouteMode::Public => Self::Public,
            RouteMode::Company => Self::Company,
        }
    }
}

impl Chrome {
    pub const fn shows_public_header(self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Screens with fixed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticPage {
    Login,
    Register,
    MyPage,
    CompanyProfile,
    Terms,
    Privacy,
    CompanyLp,
    CompanyLogin,
    CompanyRegister,
}

impl StaticPage {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "ログイン",
            Self::Register => "新規登録",
            Self::MyPage => "マイページ",
            Self::CompanyProfile => "プロフィール",
            Self::Terms => "利用規約",
            Self::Privacy => "プライバシーポリシー",
            Self::CompanyLp => "採用担当者の方へ",
            Self::CompanyLogin => "企業ログイン",
            Self::CompanyRegister => "企業アカウント登録",
        }
    }
}

/// Kind of entity a route failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingResource {
    Listing,
    Organization,
    Article,
    Page,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageBody {
    Home {
        total: usize,
        listings: Vec<ListingCard>,
        selection: FilterSelection,
        articles: Vec<ArticleTeaser>,
    },
    JobDetail {
        listing: Listing,
        related: Vec<ListingCard>,
    },
    CompanyDetail {
        organization: Arc<Organization>,
        listings: Vec<ListingCard>,
    },
    ArticleDetail {
        article: Article,
    },
    Application {
        listing: ListingCard,
    },
    CompanyDashboard {
        organization: Arc<Organization>,
        listings: Vec<ListingCard>,
    },
    Static {
        page: StaticPage,
        title: &'static str,
    },
    NotFound {
        resource: MissingResource,
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleTeaser {
    pub id: String,
    pub title: String,
    pub summary: String,
}

/// Fully resolved screen for one [`BrowseState`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub route: Route,
    pub path: String,
    pub chrome: Chrome,
    pub body: PageBody,
}

impl Page {
    pub fn is_not_found(&self) -> bool {
        matches!(self.body, PageBody::NotFound { .. })
    }
}

/// Resolves the active route against `catalog`.
///
/// Ids that do not resolve produce a [`PageBody::NotFound`] body; only a failing catalog is
/// reported as an error.
pub fn render<C: ListingCatalog + ?Sized>(
    state: &BrowseState,
    catalog: &C,
) -> Result<Page, CatalogError> {
    let route = &state.route;
    let body = match route {
        Route::Home => home(&state.selection, catalog)?,
        Route::JobDetail { listing_id } => match catalog.listing(listing_id)? {
            Some(listing) => {
                let related = catalog
                    .listings_for_organization(listing.organization_id())?
                    .into_iter()
                    .filter(|other| other.id != listing.id)
                    .take(RELATED_LISTINGS)
                    .map(|other| other.card())
                    .collect();
                PageBody::JobDetail { listing, related }
            }
            None => not_found(MissingResource::Listing, listing_id.as_str()),
        },
        Route::CompanyDetail { organization_id } => {
            match catalog.organization(organization_id)? {
                Some(organization) => PageBody::CompanyDetail {
                    listings: cards(catalog.listings_for_organization(organization_id)?),
                    organization,
                },
                None => not_found(MissingResource::Organization, organization_id.as_str()),
            }
        }
        Route::ArticleDetail { article_id } => match catalog.article(article_id)? {
            Some(article) => PageBody::ArticleDetail { article },
            None => not_found(MissingResource::Article, article_id.as_str()),
        },
        Route::Application { listing_id } => match catalog.listing(listing_id)? {
            Some(listing) => PageBody::Application {
                listing: listing.card(),
            },
            None => not_found(MissingResource::Listing, listing_id.as_str()),
        },
        Route::CompanyDashboard { organization_id } => {
            match catalog.organization(organization_id)? {
                Some(organization) => PageBody::CompanyDashboard {
                    listings: cards(catalog.listings_for_organization(organization_id)?),
                    organization,
                },
                None => not_found(MissingResource::Organization, organization_id.as_str()),
            }
        }
        Route::Login => static_page(StaticPage::Login),
        Route::Register => static_page(StaticPage::Register),
        Route::MyPage => static_page(StaticPage::MyPage),
        Route::CompanyProfile => static_page(StaticPage::CompanyProfile),
        Route::Terms => static_page(StaticPage::Terms),
        Route::Privacy => static_page(StaticPage::Privacy),
        Route::CompanyLp => static_page(StaticPage::CompanyLp),
        Route::CompanyLogin => static_page(StaticPage::CompanyLogin),
        Route::CompanyRegister => static_page(StaticPage::CompanyRegister),
    };

    Ok(Page {
        route: route.clone(),
        path: route.path(),
        chrome: route.mode().into(),
        body,
    })
}

/// Resolves a URL path with an empty selection. Unknown paths render a not-found page.
pub fn render_path<C: ListingCatalog + ?Sized>(
    path: &str,
    catalog: &C,
) -> Result<Page, CatalogError> {
    match Route::from_path(path) {
        Some(route) => render(&BrowseState::at(route), catalog),
        None => Ok(Page {
            route: Route::Home,
            path: path.to_string(),
            chrome: Chrome::Public,
            body: not_found(MissingResource::Page, path),
        }),
    }
}

fn home<C: ListingCatalog + ?Sized>(
    selection: &FilterSelection,
    catalog: &C,
) -> Result<PageBody, CatalogError> {
    let listings = catalog.listings()?;
    let matched: Vec<ListingCard> = filter_listings(&listings, selection)
        .into_iter()
        .map(Listing::card)
        .collect();

    let mut articles = catalog.articles()?;
    articles.sort_by(|a, b| b.published_on.cmp(&a.published_on));
    let articles = articles
        .into_iter()
        .take(LATEST_ARTICLES)
        .map(|article| ArticleTeaser {
            id: article.id.0,
            title: article.title,
            summary: article.summary,
        })
        .collect();

    Ok(PageBody::Home {
        total: matched.len(),
        listings: matched,
        selection: selection.clone(),
        articles,
    })
}

fn cards(listings: Vec<Listing>) -> Vec<ListingCard> {
    listings.iter().map(Listing::card).collect()
}

fn static_page(page: StaticPage) -> PageBody {
    PageBody::Static {
        page,
        title: page.title(),
    }
}

fn not_found(resource: MissingResource, id: &str) -> PageBody {
    PageBody::NotFound {
        resource,
        id: id.to_string(),
    }
}
