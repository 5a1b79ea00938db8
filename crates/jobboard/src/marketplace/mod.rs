pub mod applications;
pub mod catalog;
pub mod domain;
pub mod filter;
pub mod navigation;
mod router;

pub use router::{
    browse_router, DispatchRequest, DispatchResponse, ListingQuery, ListingSearchResponse,
    PageQuery,
};
