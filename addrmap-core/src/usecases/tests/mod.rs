//! Test doubles for the gateways.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::time::Instant;

use crate::{
    entities::*,
    gateways::{geocode::GeoCodingGateway, render::MapRenderer, store::RecordStore, Error},
};

#[derive(Debug, Clone)]
enum Lookup {
    Found(MapPoint),
    NotFound,
    Failure,
}

#[derive(Debug, Default)]
struct GeoCoderState {
    requested: Mutex<Vec<String>>,
    running: AtomicUsize,
    max_running: AtomicUsize,
    outages: AtomicUsize,
}

/// Geocoder answering from a fixed table, unknown addresses fail.
#[derive(Debug, Clone, Default)]
pub struct StubGeoCoder {
    lookups: HashMap<String, Lookup>,
    latency: Duration,
    state: Arc<GeoCoderState>,
}

impl StubGeoCoder {
    pub fn found(mut self, address: &str, lat: f64, lng: f64) -> Self {
        let pos = MapPoint::try_from_lat_lng_deg(lat, lng).unwrap();
        self.lookups.insert(address.into(), Lookup::Found(pos));
        self
    }
    pub fn not_found(mut self, address: &str) -> Self {
        self.lookups.insert(address.into(), Lookup::NotFound);
        self
    }
    pub fn failing(mut self, address: &str) -> Self {
        self.lookups.insert(address.into(), Lookup::Failure);
        self
    }
    /// Fails the next `count` requests regardless of the address.
    pub fn outages(self, count: usize) -> Self {
        self.state.outages.store(count, Ordering::SeqCst);
        self
    }
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
    pub fn calls(&self) -> usize {
        self.state.requested.lock().len()
    }
    pub fn requested(&self) -> Vec<String> {
        self.state.requested.lock().clone()
    }
    pub fn max_concurrent_calls(&self) -> usize {
        self.state.max_running.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoCodingGateway for StubGeoCoder {
    async fn resolve_address(&self, address: &str) -> Result<Option<MapPoint>, Error> {
        self.state.requested.lock().push(address.to_owned());
        let running = self.state.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_running.fetch_max(running, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.state.running.fetch_sub(1, Ordering::SeqCst);
        let outage = self
            .state
            .outages
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if outage {
            return Err(Error::Geocoding(anyhow!("service unavailable")));
        }
        match self.lookups.get(address) {
            Some(Lookup::Found(pos)) => Ok(Some(*pos)),
            Some(Lookup::NotFound) => Ok(None),
            Some(Lookup::Failure) | None => {
                Err(Error::Geocoding(anyhow!("no connection to resolve '{address}'")))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Write {
    pub table: TableId,
    pub id: RecordId,
    pub values: FieldValues,
    pub at: Instant,
}

#[derive(Debug, Default)]
struct StoreState {
    writes: Mutex<Vec<Write>>,
    options: Mutex<HashMap<String, Value>>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    failing: bool,
    state: Arc<StoreState>,
}

impl RecordingStore {
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
    pub fn writes(&self) -> Vec<Write> {
        self.state.writes.lock().clone()
    }
    pub fn option(&self, key: &str) -> Option<Value> {
        self.state.options.lock().get(key).cloned()
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn update_record(
        &self,
        table: &TableId,
        id: RecordId,
        values: FieldValues,
    ) -> Result<(), Error> {
        if self.failing {
            return Err(Error::RecordNotFound(id));
        }
        self.state.writes.lock().push(Write {
            table: table.clone(),
            id,
            values,
            at: Instant::now(),
        });
        Ok(())
    }

    async fn set_option(&self, key: &str, value: Value) -> Result<(), Error> {
        if self.failing {
            return Err(Error::Other(anyhow!("read-only")));
        }
        self.state.options.lock().insert(key.to_owned(), value);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RendererState {
    views: Mutex<Vec<MapView>>,
    problems: Mutex<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    state: Arc<RendererState>,
}

impl RecordingRenderer {
    pub fn views(&self) -> Vec<MapView> {
        self.state.views.lock().clone()
    }
    pub fn last_view(&self) -> Option<MapView> {
        self.state.views.lock().last().cloned()
    }
    pub fn problems(&self) -> Vec<String> {
        self.state.problems.lock().clone()
    }
}

impl MapRenderer for RecordingRenderer {
    fn render(&self, view: &MapView) {
        self.state.views.lock().push(view.clone());
    }
    fn show_problem(&self, problem: &str) {
        self.state.problems.lock().push(problem.to_owned());
    }
}
