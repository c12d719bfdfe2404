//! Daily route planning for field crews.
//!
//! Orders a crew's jobs for the day into a nearest-neighbour driving tour,
//! estimates leg distances and drive times, and links the result into a
//! navigation app.

pub mod types;
pub mod jobs;
pub mod traits;
pub mod haversine;
pub mod drive_time;
pub mod tour;
pub mod map_link;
pub mod geocode;
pub mod resolver;
pub mod config;
pub mod planner;
pub mod service;
