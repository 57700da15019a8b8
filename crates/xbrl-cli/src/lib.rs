pub mod discovery;
pub mod logging;

pub use discovery::{DiscoveryError, discover_instances};
