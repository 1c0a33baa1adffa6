//! tablescript - Tabular data model and text templates
//!
//! Loads tables from CSV, JSON or spreadsheet files into an in-memory schema of
//! rows and tables, then renders text files from it through built-in or Tera
//! templates.

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod text;

pub use config::Config;
pub use error::ModelError;
pub use model::{Row, Schema, Table};
pub use text::{StandardText, TextTransformer};
