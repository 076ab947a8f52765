use std::{
    fs,
    io::{self, ErrorKind},
    path::Path,
};

use addrmap_core::{
    entities::{FieldValues, Record, RecordId, TableId},
    gateways::{store::RecordStore, Error},
    widget::WidgetOptions,
};
use anyhow::anyhow;
use async_trait::async_trait;
use jfs::Store;
use parking_lot::Mutex;
use serde_json::Value;

const OPTIONS_DIR: &str = "options";
const WIDGET_OPTIONS_ID: &str = "widget";

/// A record store that keeps every table in a JSON file.
///
/// Intended for local use and testing, `<dir>/<table>.json` contains
/// the records of a table as an array.
///
/// The file access is blocking and runs on the calling thread,
/// even within the async [RecordStore] methods.
pub struct JsonFileStore {
    tables: Store,
    options: Store,
    // Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory.join(OPTIONS_DIR))?;
        let tables = Store::new(directory)?;
        let options = Store::new(directory.join(OPTIONS_DIR))?;
        Ok(Self {
            tables,
            options,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        self.tables.path()
    }

    pub fn load_records(&self, table: &TableId) -> Result<Vec<Record>, Error> {
        self.tables
            .get::<Vec<Record>>(table.as_str())
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => Error::TableNotFound(table.clone()),
                _ => Error::Other(err.into()),
            })
    }

    pub fn save_records(&self, table: &TableId, records: &[Record]) -> Result<(), Error> {
        if !table.is_valid() {
            return Err(Error::Other(anyhow!("Invalid table name '{table}'")));
        }
        self.tables
            .save_with_id(&records.to_vec(), table.as_str())
            .map_err(|err| Error::Other(err.into()))?;
        Ok(())
    }

    pub fn load_options(&self) -> Result<WidgetOptions, Error> {
        let options = self.load_raw_options()?;
        serde_json::from_value(Value::Object(options)).map_err(|err| Error::Other(err.into()))
    }

    fn load_raw_options(&self) -> Result<FieldValues, Error> {
        match self.options.get::<FieldValues>(WIDGET_OPTIONS_ID) {
            Ok(options) => Ok(options),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(FieldValues::new()),
            Err(err) => Err(Error::Other(err.into())),
        }
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn update_record(
        &self,
        table: &TableId,
        id: RecordId,
        values: FieldValues,
    ) -> Result<(), Error> {
        let _lock = self.lock.lock();
        let mut records = self.load_records(table)?;
        let record = records
            .iter_mut()
            .find(|rec| rec.id == id)
            .ok_or(Error::RecordNotFound(id))?;
        record.merge(values);
        self.save_records(table, &records)?;
        log::debug!("Updated record {id} of table {table}");
        Ok(())
    }

    async fn set_option(&self, key: &str, value: Value) -> Result<(), Error> {
        let _lock = self.lock.lock();
        let mut options = self.load_raw_options()?;
        options.insert(key.to_owned(), value);
        self.options
            .save_with_id(&options, WIDGET_OPTIONS_ID)
            .map_err(|err| Error::Other(err.into()))?;
        Ok(())
    }
}
