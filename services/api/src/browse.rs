use crate::infra::load_catalog;
use clap::Args;
use jobboard::config::AppConfig;
use jobboard::error::AppError;
use jobboard::marketplace::catalog::{InMemoryCatalog, ListingCatalog, ListingCsvImporter};
use jobboard::marketplace::domain::ListingCard;
use jobboard::marketplace::filter::{filter_listings, Facet, FilterSelection};
use jobboard::marketplace::navigation::{
    reduce, render, render_path, Action, BrowseState, Page, PageBody, Route,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    /// Free-text query matched against title, company, description, and tags
    #[arg(long, short)]
    pub(crate) query: Option<String>,
    /// Occupation tag (repeatable)
    #[arg(long)]
    pub(crate) occupation: Vec<String>,
    /// Programming or spoken language (repeatable)
    #[arg(long)]
    pub(crate) language: Vec<String>,
    /// Company industry (repeatable)
    #[arg(long)]
    pub(crate) industry: Vec<String>,
    /// Prefecture or フルリモート (repeatable)
    #[arg(long)]
    pub(crate) area: Vec<String>,
    /// Characteristic such as 時給1500円以上 (repeatable, all must hold)
    #[arg(long)]
    pub(crate) characteristic: Vec<String>,
    /// Print matches as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

impl SearchArgs {
    fn selection(self) -> FilterSelection {
        FilterSelection::default()
            .with_query(self.query.unwrap_or_default())
            .with_values(Facet::Occupation, self.occupation)
            .with_values(Facet::Language, self.language)
            .with_values(Facet::Industry, self.industry)
            .with_values(Facet::Area, self.area)
            .with_values(Facet::Characteristic, self.characteristic)
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct BrowseArgs {
    /// Paths to visit in order; `back` and `home` replay those actions
    #[arg(long = "path", required = true)]
    pub(crate) paths: Vec<String>,
    /// Search query applied before navigating
    #[arg(long)]
    pub(crate) query: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Listing export with columns id, organization_id, title, ...
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let catalog = configured_catalog()?;
    let json = args.json;
    let selection = args.selection();
    let listings = catalog.listings()?;
    let cards: Vec<ListingCard> = filter_listings(&listings, &selection)
        .into_iter()
        .map(|listing| listing.card())
        .collect();

    if json {
        match serde_json::to_string_pretty(&cards) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Search results unavailable: {}", err),
        }
        return Ok(());
    }

    for line in selection_lines(&selection) {
        println!("{line}");
    }
    println!("{} of {} listings match", cards.len(), listings.len());
    for card in &cards {
        println!("{}", card_line(card));
    }
    Ok(())
}

pub(crate) fn run_browse(args: BrowseArgs) -> Result<(), AppError> {
    let catalog = configured_catalog()?;
    let mut state = match args.query {
        Some(query) => reduce(BrowseState::default(), Action::SetQuery { query }),
        None => BrowseState::default(),
    };

    println!("{}", describe(&render(&state, &catalog)?));
    for step in &args.paths {
        let (next, page) = replay_step(state, step, &catalog)?;
        state = next;
        println!("\n> {step}");
        println!("{}", describe(&page));
    }
    Ok(())
}

/// Applies one browse step. Steps that are not a known path keep the state and render the
/// not-found page for that path.
fn replay_step(
    state: BrowseState,
    step: &str,
    catalog: &InMemoryCatalog,
) -> Result<(BrowseState, Page), AppError> {
    match action_for(step) {
        Some(action) => {
            let state = reduce(state, action);
            let page = render(&state, catalog)?;
            Ok((state, page))
        }
        None => {
            let page = render_path(step.trim(), catalog)?;
            Ok((state, page))
        }
    }
}

pub(crate) fn run_catalog_import(args: ImportArgs) -> Result<(), AppError> {
    let catalog = configured_catalog()?;
    let listings = ListingCsvImporter::from_path(&args.csv, &catalog)?;
    let imported = listings.len();
    let merged = catalog.with_listings(listings)?;
    let summary = merged.summary();

    println!("Imported {} listings from {}", imported, args.csv.display());
    println!(
        "- catalog now holds {} listings across {} organizations",
        summary.listings, summary.organizations
    );
    Ok(())
}

fn configured_catalog() -> Result<InMemoryCatalog, AppError> {
    let config = AppConfig::load()?;
    load_catalog(&config.catalog)
}

fn action_for(step: &str) -> Option<Action> {
    match step.trim() {
        "back" => Some(Action::Back),
        "home" => Some(Action::Home),
        path => Route::from_path(path).map(|route| Action::Navigate { route }),
    }
}

fn card_line(card: &ListingCard) -> String {
    format!(
        "  - [{}] {} | {} | {} | {} / {}",
        card.id, card.title, card.organization_name, card.salary, card.work_style, card.engagement
    )
}

/// Query and facet headings for the active filters, one line each.
fn selection_lines(selection: &FilterSelection) -> Vec<String> {
    let mut lines = Vec::new();
    if !selection.query.is_empty() {
        lines.push(format!("query: {}", selection.query));
    }
    for facet in Facet::ordered() {
        let values = selection.values(facet);
        if !values.is_empty() {
            let joined: Vec<&str> = values.iter().map(String::as_str).collect();
            lines.push(format!("{}: {}", facet.label(), joined.join(", ")));
        }
    }
    lines
}

fn describe(page: &Page) -> String {
    let mut lines = vec![format!("{} ({:?} chrome)", page.path, page.chrome)];
    match &page.body {
        PageBody::Home {
            total,
            listings,
            selection,
            articles,
        } => {
            lines.extend(selection_lines(selection));
            lines.push(format!("{total} listings"));
            lines.extend(listings.iter().map(card_line));
            lines.extend(
                articles
                    .iter()
                    .map(|article| format!("  * {} {}", article.id, article.title)),
            );
        }
        PageBody::JobDetail { listing, related } => {
            lines.push(format!("{} at {}", listing.title, listing.organization.name));
            lines.push(format!("{} | {}", listing.location, listing.salary));
            lines.extend(related.iter().map(card_line));
        }
        PageBody::CompanyDetail {
            organization,
            listings,
        }
        | PageBody::CompanyDashboard {
            organization,
            listings,
        } => {
            lines.push(format!("{} ({})", organization.name, organization.industry));
            lines.extend(listings.iter().map(card_line));
        }
        PageBody::ArticleDetail { article } => {
            lines.push(format!("{} ({})", article.title, article.published_on));
        }
        PageBody::Application { listing } => {
            lines.push(format!("apply to {}", card_line(listing).trim_start()));
        }
        PageBody::Static { title, .. } => lines.push(title.to_string()),
        PageBody::NotFound { resource, id } => {
            lines.push(format!("{resource:?} {id} not found"));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_args_build_selection() {
        let args = SearchArgs {
            query: Some("開発".to_string()),
            language: vec!["Go".to_string(), "Rust".to_string()],
            characteristic: vec!["リモート可".to_string()],
            ..SearchArgs::default()
        };
        let selection = args.selection();
        assert_eq!(selection.query, "開発");
        assert_eq!(selection.values(Facet::Language).len(), 2);
        assert_eq!(selection.values(Facet::Characteristic).len(), 1);
        assert!(selection.values(Facet::Area).is_empty());
    }

    #[test]
    fn steps_map_to_actions() {
        assert!(matches!(action_for("back"), Some(Action::Back)));
        assert!(matches!(action_for(" home "), Some(Action::Home)));
        assert!(matches!(
            action_for("/jobs/job-003"),
            Some(Action::Navigate { route: Route::JobDetail { .. } })
        ));
        assert!(action_for("/nowhere/else").is_none());
    }

    #[test]
    fn replayed_navigation_keeps_query() {
        let catalog = InMemoryCatalog::sample();
        let state = reduce(
            BrowseState::default(),
            Action::SetQuery {
                query: "Go".to_string(),
            },
        );
        let (state, _) = replay_step(state, "/jobs/job-001", &catalog).expect("detail");
        let (_, page) = replay_step(state, "back", &catalog).expect("back");

        let text = describe(&page);
        assert!(text.starts_with("/ (Public chrome)"));
        assert!(text.contains("query: Go"));
        assert!(text.contains("1 listings"));
        assert!(text.contains("job-001"));
    }

    #[test]
    fn describe_reports_missing_listing() {
        let catalog = InMemoryCatalog::sample();
        let page = render(&BrowseState::at(Route::job("job-999")), &catalog).expect("render");
        assert!(describe(&page).contains("Listing job-999 not found"));
    }

    #[test]
    fn unknown_step_renders_not_found_and_keeps_state() {
        let catalog = InMemoryCatalog::sample();
        let state = BrowseState::at(Route::job("job-001"));

        let (next, page) = replay_step(state.clone(), "/nowhere", &catalog).expect("step");
        assert_eq!(next, state);
        let text = describe(&page);
        assert!(text.starts_with("/nowhere (Public chrome)"));
        assert!(text.contains("Page /nowhere not found"));
    }

    #[test]
    fn selection_lines_use_facet_labels_in_facet_order() {
        let selection = FilterSelection::default()
            .with_query("Go")
            .with_values(
                Facet::Area,
                vec!["東京都".to_string(), "フルリモート".to_string()],
            )
            .with_value(Facet::Occupation, "エンジニア");

        assert_eq!(
            selection_lines(&selection),
            vec![
                "query: Go".to_string(),
                "職種: エンジニア".to_string(),
                "エリア: フルリモート, 東京都".to_string(),
            ]
        );
        assert!(selection_lines(&FilterSelection::default()).is_empty());
    }
}
