//! Journey building from raw announcements.
//!
//! The pipeline runs in full on every refresh:
//!
//! 1. [`aggregate`] folds announcements into one stop per train and station.
//! 2. [`build_timelines`] orders each train's stops and finds where it is.
//! 3. [`build_direct`] and [`ConnectionMatcher`] turn timelines into journeys.
//! 4. [`JourneyCatalog`] runs the configured routes and assembles the views.

mod aggregate;
mod catalog;
mod config;
mod connect;
mod direct;
mod timeline;

pub use aggregate::{AggregatedStops, StopAggregator, aggregate};
pub use catalog::{Catalog, CatalogView, JourneyCatalog, UnknownView};
pub use config::{CatalogConfig, MatchPolicy, RouteDefinition};
pub use connect::ConnectionMatcher;
pub use direct::build_direct;
pub use timeline::build_timelines;
