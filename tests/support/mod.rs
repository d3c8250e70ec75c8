#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use danmarkskort::LookupError;
use danmarkskort::address::{AddressLookup, AddressSuggestion, Coordinates, ResolvedAddress};
use danmarkskort::grid::{GridOperator, GridOperatorLookup, OperatorCandidate};
use danmarkskort::map::MapView;
use danmarkskort::session::Session;
use danmarkskort::statics;
use danmarkskort::worker::{InlineSpawner, Job, Spawn};

pub fn http_error(service: &'static str, status: u16) -> LookupError {
    LookupError::Status { service, status }
}

/// In-memory address registry. Autocomplete answers `<query> <n>` rows; lookups by id
/// answer with the registry-ordered `[lon, lat]` pair for that id.
#[derive(Default)]
pub struct FakeRegistry {
    pub hits_per_query: usize,
    pub autocomplete_fails: bool,
    pub points: Vec<(String, [f64; 2])>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn with_hits(hits_per_query: usize) -> Self {
        Self {
            hits_per_query,
            ..Default::default()
        }
    }

    pub fn point(mut self, id: &str, lon_lat: [f64; 2]) -> Self {
        self.points.push((id.to_string(), lon_lat));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl AddressLookup for FakeRegistry {
    fn autocomplete(&self, query: &str) -> Result<Vec<AddressSuggestion>, LookupError> {
        self.calls.lock().unwrap().push(format!("autocomplete:{query}"));
        if self.autocomplete_fails {
            return Err(http_error("address autocomplete", 503));
        }
        Ok((0..self.hits_per_query)
            .map(|i| AddressSuggestion::new(format!("{query}-{i}"), format!("{query} {i}")))
            .collect())
    }

    fn get_by_id(&self, id: &str) -> Result<ResolvedAddress, LookupError> {
        self.calls.lock().unwrap().push(format!("get_by_id:{id}"));
        let Some((_, [lon, lat])) = self.points.iter().find(|(p, _)| p == id) else {
            return Err(http_error("address lookup", 404));
        };
        Ok(ResolvedAddress {
            id: id.to_string(),
            coordinates: Coordinates::from_lon_lat(*lon, *lat),
        })
    }
}

#[derive(Default)]
pub struct FakeGrid {
    pub enabled: bool,
    pub candidates: Vec<OperatorCandidate>,
    pub suppliers: Vec<GridOperator>,
    pub autocomplete_fails: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeGrid {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_operator(external_id: Option<&str>, suppliers: Vec<GridOperator>) -> Self {
        Self {
            enabled: true,
            candidates: vec![OperatorCandidate {
                external_supplier_id: external_id.map(str::to_string),
            }],
            suppliers,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl GridOperatorLookup for FakeGrid {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn autocomplete_operator(
        &self,
        full_address_text: &str,
    ) -> Result<Vec<OperatorCandidate>, LookupError> {
        if !self.enabled {
            return Ok(Vec::new());
        }
        self.calls
            .lock()
            .unwrap()
            .push(format!("autocomplete_operator:{full_address_text}"));
        if self.autocomplete_fails {
            return Err(http_error("elnet autocomplete", 502));
        }
        Ok(self.candidates.clone())
    }

    fn supplier_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Vec<GridOperator>, LookupError> {
        if !self.enabled {
            return Ok(Vec::new());
        }
        self.calls
            .lock()
            .unwrap()
            .push(format!("supplier_by_external_id:{external_id}"));
        Ok(self.suppliers.clone())
    }
}

/// Holds jobs until the test runs them, in whatever order it likes.
#[derive(Clone, Default)]
pub struct DeferredSpawner {
    pub jobs: Arc<Mutex<Vec<Job>>>,
}

impl DeferredSpawner {
    pub fn take(&self) -> Vec<Job> {
        std::mem::take(&mut *self.jobs.lock().unwrap())
    }
}

impl Spawn for DeferredSpawner {
    fn spawn(&self, _name: &str, job: Job) -> io::Result<()> {
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}

/// Runs jobs inline until `refuse` is called, then rejects them like a process that has
/// run out of threads.
#[derive(Clone, Default)]
pub struct GatedSpawner {
    refusing: Arc<AtomicBool>,
}

impl GatedSpawner {
    pub fn refuse(&self) {
        self.refusing.store(true, Ordering::SeqCst);
    }
}

impl Spawn for GatedSpawner {
    fn spawn(&self, _name: &str, job: Job) -> io::Result<()> {
        if self.refusing.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::WouldBlock, "no threads left"));
        }
        job();
        Ok(())
    }
}

pub fn session(registry: &Arc<FakeRegistry>, grid: &Arc<FakeGrid>) -> Session<MapView> {
    Session::new(
        registry.clone(),
        grid.clone(),
        Box::new(InlineSpawner),
        MapView::denmark(statics::OSM_TILE_URL),
    )
}

pub fn radius_elnet() -> GridOperator {
    GridOperator {
        name: "Radius Elnet A/S".to_string(),
        phone_number: Some("70 15 95 60".to_string()),
        website_url: Some("radiuselnet.dk".to_string()),
        logo_url: Some("https://cdn.example/radius.png".to_string()),
    }
}
