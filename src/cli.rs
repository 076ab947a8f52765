use std::{fs, path::PathBuf, sync::Arc};

use addrmap_core::{
    entities::{AccessLevel, DisplayMode, FieldMapping, MapView, RecordId, TableId},
    gateways::render::MapRenderer,
    widget::{ScanOutcome, Widget, WidgetOptions, WidgetSettings},
};
use anyhow::{anyhow, Context as _, Result};
use clap::{Args, Parser, Subcommand};
use parking_lot::Mutex;

use crate::{config::Config, gateways};

#[derive(Parser)]
#[command(version, about = "Show host records on a map and resolve their addresses")]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the addresses of all geocoding enabled records of a table
    Geocode(TableArgs),
    /// Print the markers of a table as JSON
    Markers {
        #[command(flatten)]
        table: TableArgs,
        /// Display mode, defaults to the stored or configured mode
        #[arg(long)]
        mode: Option<DisplayMode>,
        /// Id of the selected record
        #[arg(long, value_name = "ID")]
        select: Option<u64>,
    },
}

#[derive(Args)]
pub struct TableArgs {
    /// Name of the table
    #[arg(short, long)]
    pub table: String,
    /// JSON file mapping the field roles to custom columns
    #[arg(long, value_name = "FILE")]
    pub mapping: Option<PathBuf>,
}

impl TableArgs {
    fn table_id(&self) -> Result<TableId> {
        let table = TableId::from(self.table.as_str());
        if !table.is_valid() {
            return Err(anyhow!("Invalid table name '{}'", self.table));
        }
        Ok(table)
    }

    fn load_mapping(&self) -> Result<Option<FieldMapping>> {
        self.mapping
            .as_ref()
            .map(|path| {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Unable to read mapping {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("Invalid mapping {}", path.display()))
            })
            .transpose()
    }
}

/// Keeps what would have been drawn.
#[derive(Clone, Default)]
struct LastRendering(Arc<Mutex<Option<Result<MapView, String>>>>);

impl LastRendering {
    fn take(&self) -> Option<Result<MapView, String>> {
        self.0.lock().take()
    }
}

impl MapRenderer for LastRendering {
    fn render(&self, view: &MapView) {
        log::debug!("Rendering {} markers", view.markers.len());
        *self.0.lock() = Some(Ok(view.clone()));
    }

    fn show_problem(&self, problem: &str) {
        log::warn!("{problem}");
        *self.0.lock() = Some(Err(problem.to_owned()));
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let cfg = Config::try_load_from_file_or_default(cli.config.as_ref())?;
    match cli.command {
        Command::Geocode(args) => geocode(&cfg, args).await,
        Command::Markers {
            table,
            mode,
            select,
        } => markers(&cfg, table, mode, select.map(RecordId::new)).await,
    }
}

async fn geocode(cfg: &Config, args: TableArgs) -> Result<()> {
    let table = args.table_id()?;
    let mapping = args.load_mapping()?;
    let store = gateways::record_store(&cfg.store)?;
    let records = store.load_records(&table)?;
    log::info!("Loaded {} records of table {table}", records.len());

    let widget = Widget::new(
        gateways::geocoding_gateway(&cfg.geocoding),
        store,
        LastRendering::default(),
        WidgetSettings {
            mode: DisplayMode::Multi,
            rate_limit: cfg.geocoding.rate_limit,
        },
    );
    widget.on_message(Some(table.clone()));
    widget.on_options(WidgetOptions::default(), AccessLevel::Full);

    match widget.on_record_batch(records, mapping).await {
        ScanOutcome::Completed(report) => {
            log::info!(
                "Resolved {} records of table {table} ({} without match, {} skipped)",
                report.resolved,
                report.unmatched,
                report.skipped
            );
            Ok(())
        }
        ScanOutcome::Skipped => {
            log::info!("Nothing to geocode in table {table}");
            Ok(())
        }
        ScanOutcome::Failed => Err(anyhow!("Geocoding of table {table} failed")),
    }
}

async fn markers(
    cfg: &Config,
    args: TableArgs,
    mode: Option<DisplayMode>,
    select: Option<RecordId>,
) -> Result<()> {
    let table = args.table_id()?;
    let mapping = args.load_mapping()?;
    let store = gateways::record_store(&cfg.store)?;
    let records = store.load_records(&table)?;
    let stored = store.load_options()?;
    let selected = select
        .map(|id| {
            records
                .iter()
                .find(|rec| rec.id == id)
                .cloned()
                .ok_or_else(|| anyhow!("The record {id} does not exist in table {table}"))
        })
        .transpose()?;

    let rendering = LastRendering::default();
    let widget = Widget::new(
        gateways::geocoding_gateway(&cfg.geocoding),
        store,
        rendering.clone(),
        WidgetSettings {
            mode: cfg.widget.mode,
            rate_limit: cfg.geocoding.rate_limit,
        },
    );
    widget.on_message(Some(table));
    // Read-only: printing markers must not trigger geocoding
    let options = WidgetOptions {
        mode: mode.or(stored.mode),
    };
    widget.on_options(options, AccessLevel::ReadTable);
    widget.on_record_batch(records, mapping.clone()).await;
    if let Some(record) = selected {
        widget.on_record(record, mapping).await;
    }

    match rendering.take() {
        Some(Ok(view)) => {
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
        Some(Err(problem)) => Err(anyhow!(problem)),
        None => Err(anyhow!("Select a record to show it in single mode")),
    }
}
