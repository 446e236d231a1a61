pub mod actions;
pub mod commands;
pub mod console;
pub mod dispatch;
pub mod telemetry;

mod start;
pub use self::start::start;
