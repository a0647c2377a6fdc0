pub mod cli;
pub mod core;
pub mod telemetry;
pub mod util;
