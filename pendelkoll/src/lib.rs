//! Commuter journey tracker.
//!
//! Folds Trafikverket train announcements into per-train timelines and
//! answers: "which trains get me from home to work today, and will I make
//! the change?"

pub mod alerts;
pub mod cache;
pub mod config;
pub mod domain;
pub mod feed;
pub mod planner;
pub mod stations;
pub mod web;
