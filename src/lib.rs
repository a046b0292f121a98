// Library exports for tablechart

pub mod assistant;
pub mod chart;
pub mod coerce;
pub mod config;
pub mod csv_reader;
pub mod data;
pub mod sheet_reader;

pub use chart::{build_chart_option, ChartBuilder, ChartOption, ChartType};
pub use data::{load_records, load_records_from_reader, Record, RecordSet};
