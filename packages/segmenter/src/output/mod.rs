//! Record set output.

mod rows;
mod writer;

pub use rows::{generate_rows, RecordRow};
pub use writer::{generate_json, generate_yaml, save, save_json, save_yaml};
