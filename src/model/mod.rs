//! Data model: rows, tables and the schema that holds them

mod row;
mod schema;
mod table;

pub use row::Row;
pub use schema::Schema;
pub use table::Table;
