use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    field::{FieldMapping, FieldRole},
    id::RecordId,
};

/// Cell values keyed by column.
pub type FieldValues = Map<String, Value>;

/// A row of a host table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: FieldValues,
}

impl Record {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            fields: FieldValues::new(),
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(column.into(), value.into());
    }

    /// The value of the column that is mapped to `role`.
    pub fn role_value(&self, mapping: &FieldMapping, role: FieldRole) -> Option<&Value> {
        mapping.column(role).and_then(|col| self.get(col))
    }

    pub fn has_role(&self, mapping: &FieldMapping, role: FieldRole) -> bool {
        mapping
            .column(role)
            .map(|col| self.has_column(col))
            .unwrap_or(false)
    }

    /// Overwrites the column of `role` if the role is mapped.
    pub fn set_role(&mut self, mapping: &FieldMapping, role: FieldRole, value: Value) {
        if let Some(col) = mapping.column(role) {
            self.set(col, value);
        }
    }

    pub fn merge(&mut self, values: FieldValues) {
        self.fields.extend(values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_host_row() {
        let json = r#"{"id": 7, "Name": "Bakery", "Longitude": 9.18, "Latitude": null}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(RecordId::new(7), record.id);
        assert_eq!(Some(&json!("Bakery")), record.get("Name"));
        assert_eq!(Some(&Value::Null), record.get("Latitude"));
        assert!(!record.has_column("id"));
        assert!(!record.has_column("Address"));
    }

    #[test]
    fn access_values_by_role() {
        let mapping = FieldMapping::canonical().with(FieldRole::Name, "Title");
        let mut record = Record::new(RecordId::new(1));
        record.set("Title", "Bakery");
        record.set("Name", "ignored");
        assert_eq!(
            Some(&json!("Bakery")),
            record.role_value(&mapping, FieldRole::Name)
        );
        assert!(record.has_role(&mapping, FieldRole::Name));
        assert!(!record.has_role(&mapping, FieldRole::Address));
        assert!(!record.has_role(
            &mapping.clone().without(FieldRole::Name),
            FieldRole::Name
        ));

        record.set_role(&mapping, FieldRole::Longitude, json!(9.18));
        assert_eq!(Some(&json!(9.18)), record.get("Longitude"));
    }

    #[test]
    fn merge_values() {
        let mut record = Record::new(RecordId::new(1));
        record.set("Longitude", Value::Null);
        let mut values = FieldValues::new();
        values.insert("Longitude".into(), json!(-75.0));
        values.insert("Latitude".into(), json!(40.0));
        record.merge(values);
        assert_eq!(Some(&json!(-75.0)), record.get("Longitude"));
        assert_eq!(Some(&json!(40.0)), record.get("Latitude"));
    }
}
