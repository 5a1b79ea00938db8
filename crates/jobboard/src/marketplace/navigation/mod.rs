//! Screen routing expressed as a reducer over an explicit browse state.

mod page;
mod route;
mod state;

pub use page::{
    render, render_path, ArticleTeaser, Chrome, MissingResource, Page, PageBody, StaticPage,
};
pub use route::{Route, RouteMode};
pub use state::{reduce, Action, BrowseState, HISTORY_LIMIT};
