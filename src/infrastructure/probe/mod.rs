//! Network probe implementations.

pub mod http_prober;

pub use http_prober::{DEFAULT_PROBE_TIMEOUT, HttpProber, parse_target};
