use serde::{Deserialize, Serialize};

use super::route::Route;
use crate::marketplace::filter::{Facet, FilterSelection};

/// Maximum number of routes remembered for back navigation.
pub const HISTORY_LIMIT: usize = 32;

/// Everything the browsing UI needs to render a screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseState {
    pub route: Route,
    /// Previously visited routes, most recent last.
    pub history: Vec<Route>,
    pub selection: FilterSelection,
}

/// Explicit user actions. Nothing else changes a [`BrowseState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Navigate { route: Route },
    Back,
    Home,
    SetQuery { query: String },
    ToggleFacet { facet: Facet, value: String },
    SetFacet { facet: Facet, values: Vec<String> },
    ClearFilters,
}

impl BrowseState {
    pub fn at(route: Route) -> Self {
        Self {
            route,
            ..Self::default()
        }
    }
}

/// Applies `action` to `state`, returning the next state.
pub fn reduce(state: BrowseState, action: Action) -> BrowseState {
    let BrowseState {
        route,
        mut history,
        selection,
    } = state;

    match action {
        Action::Navigate { route: next } => navigate(route, history, selection, next),
        Action::Home => navigate(route, history, selection, Route::Home),
        Action::Back => {
            let previous = history.pop().unwrap_or(Route::Home);
            BrowseState {
                route: previous,
                history,
                selection,
            }
        }
        Action::SetQuery { query } => BrowseState {
            route,
            history,
            selection: selection.with_query(query),
        },
        Action::ToggleFacet { facet, value } => BrowseState {
            route,
            history,
            selection: selection.toggled(facet, value),
        },
        Action::SetFacet { facet, values } => BrowseState {
            route,
            history,
            selection: selection.with_values(facet, values),
        },
        Action::ClearFilters => BrowseState {
            route,
            history,
            selection: FilterSelection::default(),
        },
    }
}

fn navigate(
    current: Route,
    mut history: Vec<Route>,
    selection: FilterSelection,
    next: Route,
) -> BrowseState {
    if current == next {
        return BrowseState {
            route: current,
            history,
            selection,
        };
    }

    history.push(current);
    if history.len() > HISTORY_LIMIT {
        let overflow = history.len() - HISTORY_LIMIT;
        history.drain(..overflow);
    }

    BrowseState {
        route: next,
        history,
        selection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_returns_home_with_filters_preserved() {
        let state = reduce(
            BrowseState::default(),
            Action::SetQuery {
                query: "Go".to_string(),
            },
        );
        let state = reduce(
            state,
            Action::ToggleFacet {
                facet: Facet::Area,
                value: "東京".to_string(),
            },
        );
        let selection = state.selection.clone();

        let state = reduce(
            state,
            Action::Navigate {
                route: Route::job("job-001"),
            },
        );
        assert_eq!(state.route, Route::job("job-001"));
        assert_eq!(state.selection, selection);

        let state = reduce(state, Action::Back);
        assert_eq!(state.route, Route::Home);
        assert_eq!(state.selection, selection);
        assert!(state.history.is_empty());
    }

    #[test]
    fn navigating_to_current_route_is_a_no_op() {
        let state = BrowseState::at(Route::job("job-001"));
        let next = reduce(
            state.clone(),
            Action::Navigate {
                route: Route::job("job-001"),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn back_with_empty_history_lands_on_home() {
        let state = reduce(BrowseState::at(Route::Terms), Action::Back);
        assert_eq!(state.route, Route::Home);
        let again = reduce(state.clone(), Action::Back);
        assert_eq!(again, state);
    }

    #[test]
    fn toggle_facet_ignores_surrounding_whitespace() {
        let toggle = |state: BrowseState, value: &str| {
            reduce(
                state,
                Action::ToggleFacet {
                    facet: Facet::Area,
                    value: value.to_string(),
                },
            )
        };
        let state = toggle(BrowseState::default(), " 東京都");
        assert!(state.selection.areas.contains("東京都"));
        let state = toggle(state, "東京都\u{3000}");
        assert!(state.selection.is_empty());
    }

    #[test]
    fn home_is_reachable_from_company_mode() {
        let state = BrowseState::at(Route::CompanyLogin);
        let state = reduce(state, Action::Home);
        assert_eq!(state.route, Route::Home);
        assert_eq!(state.history, vec![Route::CompanyLogin]);
    }

    #[test]
    fn history_is_bounded() {
        let mut state = BrowseState::default();
        for index in 0..(HISTORY_LIMIT + 10) {
            state = reduce(
                state,
                Action::Navigate {
                    route: Route::job(format!("job-{index}")),
                },
            );
        }
        assert_eq!(state.history.len(), HISTORY_LIMIT);
        assert_eq!(
            state.history.last(),
            Some(&Route::job(format!("job-{}", HISTORY_LIMIT + 8)))
        );
    }

    #[test]
    fn filter_actions_do_not_touch_route_or_history() {
        let state = reduce(
            BrowseState::at(Route::job("job-001")),
            Action::SetFacet {
                facet: Facet::Language,
                values: vec!["Go".to_string(), "Rust".to_string()],
            },
        );
        assert_eq!(state.route, Route::job("job-001"));
        assert!(state.history.is_empty());
        assert_eq!(state.selection.languages.len(), 2);

        let state = reduce(state, Action::ClearFilters);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let action: Action = serde_json::from_value(serde_json::json!({
            "type": "navigate",
            "route": { "route": "company_detail", "organization_id": "org-fincore" }
        }))
        .expect("parse");
        assert_eq!(
            action,
            Action::Navigate {
                route: Route::company("org-fincore")
            }
        );
    }
}
