mod build_view;
mod default_mapping;
mod error;
mod reconcile;

#[cfg(test)]
pub mod tests;

pub use self::{build_view::*, default_mapping::*, error::Error, reconcile::*};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, gateways::*};
}
