pub mod gateways;
pub mod usecases;
pub mod widget;

pub mod entities {
    pub use addrmap_entities::{
        access::*, field::*, geo::*, id::*, marker::*, mode::*, record::*, value,
    };
}
