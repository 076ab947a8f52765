pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::record_builder::*;

pub mod record_builder {

    use super::*;
    use crate::{field::*, id::*, record::*};
    use serde_json::Value;

    #[derive(Debug)]
    pub struct RecordBuild {
        record: Record,
    }

    impl RecordBuild {
        pub fn id(mut self, id: u64) -> Self {
            self.record.id = RecordId::new(id);
            self
        }
        pub fn field(mut self, column: &str, value: impl Into<Value>) -> Self {
            self.record.set(column, value);
            self
        }
        pub fn role(self, role: FieldRole, value: impl Into<Value>) -> Self {
            let column = role.to_string();
            self.field(&column, value)
        }
        pub fn name(self, name: &str) -> Self {
            self.role(FieldRole::Name, name)
        }
        pub fn pos(self, lat: f64, lng: f64) -> Self {
            self.role(FieldRole::Latitude, lat)
                .role(FieldRole::Longitude, lng)
        }
        pub fn no_pos(self) -> Self {
            self.role(FieldRole::Latitude, Value::Null)
                .role(FieldRole::Longitude, Value::Null)
        }
        pub fn geocode(self, enabled: bool) -> Self {
            self.role(FieldRole::Geocode, enabled)
        }
        pub fn address(self, address: &str) -> Self {
            self.role(FieldRole::Address, address)
        }
        pub fn geocoded_address(self, address: &str) -> Self {
            self.role(FieldRole::GeocodedAddress, address)
        }
        pub fn finish(self) -> Record {
            self.record
        }
    }

    impl Builder for Record {
        type Build = RecordBuild;
        fn build() -> Self::Build {
            Self::Build {
                record: Record::new(RecordId::new(1)),
            }
        }
    }
}
