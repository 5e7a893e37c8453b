/* src/client/rust/src/lib.rs */

mod api;
mod envelope;
mod monitor;
mod types;


pub use api::{DEFAULT_BASE_URL, MtrApi};
pub use envelope::ApiResponse;
pub use monitor::{ConnectionState, ServerMonitor};
pub use types::{Position, RailInfo, StationInfo, TrainCommand, TrainInfo};
