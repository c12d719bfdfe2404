//! Residential job sites in Delaware County, PA.
//!
//! Coordinates are approximate street-level points from OpenStreetMap.

#![allow(dead_code)]

use crew_route_planner::jobs::{JobRecord, JobStatus};
use crew_route_planner::types::Coordinate;

/// A named site with coordinates.
#[derive(Debug, Clone)]
pub struct Site {
    pub address: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Site {
    pub const fn new(address: &'static str, lat: f64, lng: f64) -> Self {
        Self { address, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.lat,
            longitude: self.lng,
        }
    }
}

pub const SITES: &[Site] = &[
    Site::new("301 N Orange St, Media, PA", 39.9204, -75.3893),
    Site::new("12 W Baltimore Ave, Media, PA", 39.9167, -75.3883),
    Site::new("520 Kirk Ln, Media, PA", 39.9301, -75.4006),
    Site::new("15 Rose Valley Rd, Rose Valley, PA", 39.8943, -75.3856),
    Site::new("100 S Providence Rd, Wallingford, PA", 39.8985, -75.3641),
    Site::new("700 Yale Ave, Swarthmore, PA", 39.9002, -75.3499),
    Site::new("2 Sproul Rd, Broomall, PA", 39.9682, -75.3541),
    Site::new("3400 West Chester Pike, Newtown Square, PA", 39.9868, -75.4010),
    Site::new("40 Paper Mill Rd, Springfield, PA", 39.9260, -75.3385),
    Site::new("1 Gayley St, Media, PA", 39.9143, -75.3955),
    Site::new("950 E Baltimore Pike, Lansdowne, PA", 39.9381, -75.2717),
    Site::new("20 Chester Rd, Swarthmore, PA", 39.9053, -75.3467),
];

/// Builder for job records with sensible defaults.
#[derive(Debug, Clone)]
pub struct JobBuilder {
    record: JobRecord,
}

impl JobBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            record: JobRecord {
                id: id.to_string(),
                customer_name: format!("Customer {id}"),
                status: JobStatus::Scheduled,
                assigned_crew_id: Some("crew-1".to_string()),
                scheduled_date: "2026-10-18".to_string(),
                property_coordinate: None,
                property_address: None,
                client_billing_address: None,
            },
        }
    }

    pub fn at(mut self, site: &Site) -> Self {
        self.record.property_coordinate = Some(site.coordinate());
        self.record.property_address = Some(site.address.to_string());
        self
    }

    pub fn coordinate(mut self, lat: f64, lng: f64) -> Self {
        self.record.property_coordinate = Some(Coordinate {
            latitude: lat,
            longitude: lng,
        });
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.record.property_address = Some(address.to_string());
        self
    }

    pub fn billing(mut self, address: &str) -> Self {
        self.record.client_billing_address = Some(address.to_string());
        self
    }

    pub fn active(mut self) -> Self {
        self.record.status = JobStatus::InProgress;
        self
    }

    pub fn build(self) -> JobRecord {
        self.record
    }
}

/// One job per fixture site, none active.
pub fn day_of_jobs() -> Vec<JobRecord> {
    SITES
        .iter()
        .enumerate()
        .map(|(i, site)| JobBuilder::new(&format!("J-{}", i + 1)).at(site).build())
        .collect()
}
