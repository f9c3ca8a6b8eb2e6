//! Tests for the driver: config loading and the HTTP request logic.

use std::io::Write;
use std::sync::Mutex;

use axum::http::StatusCode;
use hw_agent::{SideLane, Vehicle};
use hw_behavior::HighwayRules;
use hw_core::{Cell, SimConfig, Tick, VehicleId};
use hw_sim::{SimBuilder, Simulation, SpawnRng};
use tempfile::NamedTempFile;

use crate::load_config;
use crate::server::{poll_request, snapshot_request};

fn small() -> Mutex<Simulation<SpawnRng>> {
    let config = SimConfig { length: 50, spawn_ticks: 20, ..SimConfig::default() };
    Mutex::new(Simulation::from_config(config).unwrap())
}

fn tick(sim: &Mutex<Simulation<SpawnRng>>) -> Tick {
    sim.lock().unwrap().current_tick()
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), SimConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"length": 300, "seed": 9}}"#).unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.length, 300);
        assert_eq!(config.seed, 9);
        assert_eq!(config.lanes, SimConfig::default().lanes);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "lanes = 3").unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("absent.json").as_path())).is_err());
    }
}

#[cfg(test)]
mod server_tests {
    use super::*;

    #[test]
    fn empty_post_exports_and_steps() {
        let sim = small();
        let (status, body) = poll_request(&sim, b"");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{}", "nothing has spawned before the first tick");
        assert_eq!(tick(&sim), Tick(1));

        let (status, body) = poll_request(&sim, b"{}");
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let records = value.as_object().unwrap();
        assert_eq!(records.len(), 1, "the forced first-tick spawn");
        let (key, record) = records.iter().next().unwrap();
        assert_eq!(key, "20");
        assert_eq!(record["id"], 20);
        assert_eq!(record["speed"], 4);
        assert_eq!(tick(&sim), Tick(2));
    }

    #[test]
    fn malformed_body_is_rejected_without_stepping() {
        let sim = small();
        let (status, body) = poll_request(&sim, b"{not json");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("malformed request body"));
        assert_eq!(tick(&sim), Tick(0));
    }

    #[test]
    fn get_does_not_step() {
        let sim = small();
        poll_request(&sim, b"");
        let (status, first) = snapshot_request(&sim);
        assert_eq!(status, StatusCode::OK);
        let (_, second) = snapshot_request(&sim);
        assert_eq!(first, second);
        assert_eq!(tick(&sim), Tick(1));
    }

    #[test]
    fn departed_vehicle_is_shown_by_one_request_only() {
        let config = SimConfig { length: 10, max_speed: 2, spawn_ticks: 0, ..SimConfig::default() };
        let last = Vehicle::new(VehicleId(5), 2, SideLane::Left);
        let sim = SimBuilder::new(config, SpawnRng::new(3), HighwayRules)
            .initial_vehicles(vec![(last, Cell::new(1, 8))])
            .build()
            .unwrap();
        let sim = Mutex::new(sim);

        let (_, body) = poll_request(&sim, b"");
        assert_eq!(body, r#"{"5":{"id":5,"speed":2,"lane":1}}"#);

        let (status, body) = snapshot_request(&sim);
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["5"]["lane"], -1);
        assert_eq!(snapshot_request(&sim).1, "{}");
        assert_eq!(poll_request(&sim, b"").1, "{}");
    }

    #[test]
    fn halted_simulation_answers_503() {
        // The first spawn reuses id 1, which is already on the road.
        let config = SimConfig { length: 50, spawn_ticks: 1, ..SimConfig::default() };
        let early = Vehicle::new(VehicleId(1), 4, SideLane::Left);
        let sim = SimBuilder::new(config, SpawnRng::new(3), HighwayRules)
            .initial_vehicles(vec![(early, Cell::new(1, 10))])
            .build()
            .unwrap();
        let sim = Mutex::new(sim);

        let (status, _) = poll_request(&sim, b"");
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let (status, body) = poll_request(&sim, b"");
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("halted"));

        let (status, _) = snapshot_request(&sim);
        assert_eq!(status, StatusCode::OK);
    }
}
