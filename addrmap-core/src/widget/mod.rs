//! The map widget as seen by the host.
//!
//! The host pushes records, selections and options into a [Widget]. The
//! widget keeps the last observed snapshot, renders it through a
//! [MapRenderer] and resolves addresses of geocoding enabled records in
//! the background of a batch.

use std::time::Duration;

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    entities::*,
    gateways::{geocode::GeoCodingGateway, render::MapRenderer, store::RecordStore},
    usecases::{self, ReconcileReport},
};

mod run_guard;

pub use self::run_guard::*;

const MODE_OPTION_KEY: &str = "mode";

/// Options that the host stores on behalf of the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WidgetOptions {
    #[serde(default)]
    pub mode: Option<DisplayMode>,
}

#[derive(Debug, Clone, Copy)]
pub struct WidgetSettings {
    pub mode: DisplayMode,
    /// Pause between two geocoding requests.
    pub rate_limit: Duration,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            rate_limit: usecases::DEFAULT_RATE_LIMIT,
        }
    }
}

/// The last state observed from the host.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub table: Option<TableId>,
    pub last_record: Option<Record>,
    pub last_records: Option<Vec<Record>>,
    /// The records that are currently shown on the map.
    pub displayed: Option<Vec<Record>>,
    pub mapping: FieldMapping,
    pub selected: Option<RecordId>,
    pub mode: DisplayMode,
    pub write_access: bool,
}

impl Snapshot {
    fn new(mode: DisplayMode) -> Self {
        Self {
            table: None,
            last_record: None,
            last_records: None,
            displayed: None,
            mapping: usecases::default_mapping(None, None),
            selected: None,
            mode,
            write_access: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Another run is active or there is nothing to scan.
    Skipped,
    Completed(ReconcileReport),
    /// The run was aborted, remaining records are retried next time.
    Failed,
}

enum Rendering {
    View(MapView),
    Problem(String),
}

pub struct Widget {
    geo_gw: Box<dyn GeoCodingGateway>,
    store: Box<dyn RecordStore>,
    renderer: Box<dyn MapRenderer>,
    rate_limit: Duration,
    snapshot: Mutex<Snapshot>,
    run_guard: RunGuard,
}

impl Widget {
    pub fn new<G, S, R>(geo_gw: G, store: S, renderer: R, settings: WidgetSettings) -> Self
    where
        G: GeoCodingGateway + 'static,
        S: RecordStore + 'static,
        R: MapRenderer + 'static,
    {
        let WidgetSettings { mode, rate_limit } = settings;
        Self {
            geo_gw: Box::new(geo_gw),
            store: Box::new(store),
            renderer: Box::new(renderer),
            rate_limit,
            snapshot: Mutex::new(Snapshot::new(mode)),
            run_guard: RunGuard::default(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.lock().clone()
    }

    pub fn run_state(&self) -> RunState {
        self.run_guard.state()
    }

    /// The host announced the table the widget is linked to.
    pub fn on_message(&self, table: Option<TableId>) {
        if let Some(table) = table.filter(TableId::is_valid) {
            self.snapshot.lock().table = Some(table);
        }
    }

    pub fn on_options(&self, options: WidgetOptions, access: AccessLevel) {
        let changed = {
            let mut snapshot = self.snapshot.lock();
            snapshot.write_access = access.has_write_access();
            let mode = options.mode.unwrap_or(snapshot.mode);
            let changed = mode != snapshot.mode;
            snapshot.mode = mode;
            changed && snapshot.last_records.is_some()
        };
        if changed {
            self.update_mode();
        }
    }

    /// The selected record changed.
    pub async fn on_record(&self, record: Record, mapping: Option<FieldMapping>) -> ScanOutcome {
        let mapping = usecases::default_mapping(Some(&record), mapping);
        let mode = {
            let mut snapshot = self.snapshot.lock();
            snapshot.last_record = Some(record.clone());
            snapshot.mapping = mapping.clone();
            snapshot.mode
        };
        self.select_on_map(record);
        match mode {
            DisplayMode::Single => self.scan_on_need(&mapping).await,
            DisplayMode::Multi => ScanOutcome::Skipped,
        }
    }

    /// The records of the table changed.
    pub async fn on_record_batch(
        &self,
        records: Vec<Record>,
        mapping: Option<FieldMapping>,
    ) -> ScanOutcome {
        let mapping = usecases::default_mapping(records.first(), mapping);
        let (mode, last_record) = {
            let mut snapshot = self.snapshot.lock();
            snapshot.last_records = Some(records.clone());
            snapshot.mapping = mapping.clone();
            (snapshot.mode, snapshot.last_record.clone())
        };
        if mode == DisplayMode::Single {
            return ScanOutcome::Skipped;
        }
        self.update_map(Some(records));
        if let Some(record) = last_record {
            self.select_on_map(record);
        }
        self.scan_on_need(&mapping).await
    }

    /// The user toggled the display mode in the settings.
    pub async fn set_mode(&self, mode: DisplayMode) -> Result<(), usecases::Error> {
        if self.snapshot.lock().mode == mode {
            return Ok(());
        }
        self.snapshot.lock().mode = mode;
        self.store
            .set_option(MODE_OPTION_KEY, Value::String(mode.to_string()))
            .await
            .map_err(usecases::Error::Options)?;
        self.update_mode();
        Ok(())
    }

    /// Resolves the addresses of the displayed records unless
    /// a run is already active.
    pub async fn scan_on_need(&self, mapping: &FieldMapping) -> ScanOutcome {
        let Some(ticket) = self.run_guard.try_start() else {
            log::debug!("Geocoding is already in progress");
            return ScanOutcome::Skipped;
        };
        let (table, records, write_access) = {
            let snapshot = self.snapshot.lock();
            (
                snapshot.table.clone(),
                snapshot.displayed.clone(),
                snapshot.write_access,
            )
        };
        let (Some(table), Some(mut records)) = (table, records) else {
            return ScanOutcome::Skipped;
        };
        if !write_access {
            log::debug!("No write access to table {table}");
            return ScanOutcome::Skipped;
        }
        let res = usecases::reconcile(
            &*self.geo_gw,
            &*self.store,
            &table,
            &mut records,
            mapping,
            self.rate_limit,
        )
        .await;
        ticket.finish();
        match res {
            Ok(report) => {
                log::debug!("Geocoding of table {table} finished: {report:?}");
                ScanOutcome::Completed(report)
            }
            Err(err) => {
                log::warn!("Geocoding of table {table} aborted: {err}");
                ScanOutcome::Failed
            }
        }
    }

    fn select_on_map(&self, record: Record) {
        let mode = {
            let mut snapshot = self.snapshot.lock();
            snapshot.selected = Some(record.id);
            snapshot.mode
        };
        match mode {
            DisplayMode::Single => self.update_map(Some(vec![record])),
            DisplayMode::Multi => self.update_map(None),
        }
    }

    fn update_mode(&self) {
        let (mode, last_record, last_records) = {
            let snapshot = self.snapshot.lock();
            (
                snapshot.mode,
                snapshot.last_record.clone(),
                snapshot.last_records.clone(),
            )
        };
        match (mode, last_record) {
            (DisplayMode::Single, Some(record)) => {
                self.snapshot.lock().selected = Some(record.id);
                self.update_map(Some(vec![record]));
            }
            (DisplayMode::Single, None) => self.update_map(Some(Vec::new())),
            (DisplayMode::Multi, _) => self.update_map(last_records),
        }
    }

    /// Renders `records`, or the displayed records if `None`.
    fn update_map(&self, records: Option<Vec<Record>>) {
        let rendering = {
            let mut snapshot = self.snapshot.lock();
            if let Some(records) = records {
                snapshot.displayed = Some(records);
            }
            let displayed = snapshot.displayed.as_deref().unwrap_or_default();
            match usecases::build_view(displayed, &snapshot.mapping, snapshot.selected) {
                Ok(view) => Rendering::View(view),
                Err(problem) => Rendering::Problem(problem.to_string()),
            }
        };
        match rendering {
            Rendering::View(view) => self.renderer.render(&view),
            Rendering::Problem(problem) => self.renderer.show_problem(&problem),
        }
    }
}
