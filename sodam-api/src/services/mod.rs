//! Scoring and recommendation services
//!
//! Every service is a pure function of the compiled-in catalog plus the
//! request parameters. Persistence is left to the handlers.

pub mod diagnosis;
pub mod grade;
pub mod map;
pub mod risk;
pub mod scoring;
pub mod strategy;
pub mod support;

pub(crate) mod stats;
