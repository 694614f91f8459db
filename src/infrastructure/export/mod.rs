pub mod csv;

pub use csv::{CsvRunExporter, RunRecord};
