pub mod demo;
pub mod detectors;
pub mod player_info;
pub mod session;
pub mod storage;

pub use session::{DemoSession, HandleError};
