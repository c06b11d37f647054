pub mod processor;
pub mod translate;
pub mod utils;

pub use processor::{load_dataset, read_workbook};
