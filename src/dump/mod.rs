//! Open Library dump reading and mapping
//!
//! This module streams dump files line by line, isolates the JSON payload
//! of each line and maps it into author and work entities.

pub mod mapper;
pub mod reader;
pub mod record;

pub use mapper::{map_author, map_work};
pub use reader::{DumpLine, DumpReader};
pub use record::{extract_json, parse_line};
