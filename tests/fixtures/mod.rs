//! Test fixtures for crew-route-planner.
//!
//! Provides realistic test data including:
//! - Residential job sites around Media / Delaware County, PA
//! - A builder for job records

pub mod delaware_county_sites;

pub use delaware_county_sites::*;
