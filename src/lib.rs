pub mod calculators;
pub mod defs;
mod die;
mod distribution;
mod error;
mod properties;
mod util;
mod value;

pub use calculators::{AutoSelector, Calculator};
pub use die::{Die, DieKind};
pub use distribution::{Distribution, ResultType};
pub use error::{Error, Result};
pub use properties::{DistributionProperties, DistributionPropertiesCalculator};
pub use value::Value;
