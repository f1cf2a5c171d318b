mod filter;
mod ranked;
mod record;
mod trend;

pub use filter::*;
pub use ranked::*;
pub use record::*;
pub use trend::*;
