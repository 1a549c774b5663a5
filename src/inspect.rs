//! Read-back summaries of written dataset files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Int64Type};
use serde::Serialize;

use crate::error::Result;
use crate::table::read_table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub data_type: String,
    /// Distinct non-null values; `None` for types without a count
    pub distinct: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

impl TableSummary {
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }
}

fn distinct_values(array: &dyn Array) -> Option<usize> {
    match array.data_type() {
        DataType::Int64 => {
            let values = array.as_primitive::<Int64Type>();
            Some(values.iter().flatten().collect::<HashSet<_>>().len())
        }
        DataType::Utf8 => {
            let values = array.as_string::<i32>();
            Some(values.iter().flatten().collect::<HashSet<_>>().len())
        }
        _ => None,
    }
}

/// Load `path` and summarize its rows and columns
pub fn summarize(path: &Path) -> Result<TableSummary> {
    let table = read_table(path)?;
    let schema = table.schema();

    let columns = schema
        .fields()
        .iter()
        .zip(table.columns())
        .map(|(field, array)| ColumnSummary {
            name: field.name().clone(),
            data_type: field.data_type().to_string(),
            distinct: distinct_values(array.as_ref()),
        })
        .collect();

    Ok(TableSummary {
        path: path.to_path_buf(),
        rows: table.num_rows(),
        columns,
    })
}
