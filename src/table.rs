//! Arrow conversion and Parquet read/write primitives.
//!
//! Files are ZSTD-compressed Parquet with non-nullable columns. Overwrites go
//! through a temp file in the target's directory and are persisted over it, so
//! a reader never sees a half-written file.

use std::fs::File;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use arrow::array::{ArrayRef, Int64Array, RecordBatch, StringArray};
use arrow::compute::concat_batches;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use tempfile::NamedTempFile;

use crate::batch::Batch;
use crate::column::{ColumnType, ColumnValues};
use crate::error::Result;

fn compression_setting() -> Compression {
    Compression::ZSTD(ZstdLevel::try_new(3).unwrap_or_default())
}

/// Shared writer properties
pub fn writer_properties() -> &'static WriterProperties {
    static PROPERTIES: OnceLock<WriterProperties> = OnceLock::new();
    PROPERTIES.get_or_init(|| {
        let metadata = vec![KeyValue {
            key: "data_sandbox.version".to_string(),
            value: Some(env!("CARGO_PKG_VERSION").to_string()),
        }];

        WriterProperties::builder()
            .set_dictionary_enabled(true)
            .set_statistics_enabled(EnabledStatistics::Chunk)
            .set_compression(compression_setting())
            .set_key_value_metadata(Some(metadata))
            .build()
    })
}

pub fn arrow_type(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Int64 => DataType::Int64,
        ColumnType::Utf8 => DataType::Utf8,
    }
}

/// Arrow schema for a batch; every field is non-nullable
pub fn schema_for(batch: &Batch) -> SchemaRef {
    let fields: Vec<Field> = batch
        .columns()
        .iter()
        .map(|(name, values)| Field::new(name, arrow_type(values.column_type()), false))
        .collect();
    Arc::new(Schema::new(fields))
}

fn to_array(values: &ColumnValues) -> ArrayRef {
    match values {
        ColumnValues::Int64(v) => Arc::new(Int64Array::from(v.clone())),
        ColumnValues::Utf8(v) => Arc::new(StringArray::from_iter_values(v)),
    }
}

pub fn to_record_batch(batch: &Batch) -> Result<RecordBatch> {
    let arrays = batch.columns().iter().map(|(_, values)| to_array(values)).collect();
    Ok(RecordBatch::try_new(schema_for(batch), arrays)?)
}

fn temp_sibling(path: &Path) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    // Same mode a plain `File::create` would get under the current umask
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    Ok(builder.tempfile_in(dir)?)
}

/// Replace `path` with a Parquet file holding exactly `table`.
pub fn write_parquet(path: &Path, table: &RecordBatch) -> Result<()> {
    let temp = temp_sibling(path)?;
    {
        let mut writer = ArrowWriter::try_new(
            temp.as_file(),
            table.schema(),
            Some(writer_properties().clone()),
        )?;
        writer.write(table)?;
        writer.close()?;
    }
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read every record batch stored in `path`
pub fn read_parquet(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

/// Read `path` into a single record batch
pub fn read_table(path: &Path) -> Result<RecordBatch> {
    let (schema, batches) = read_parquet(path)?;
    Ok(concat_batches(&schema, &batches)?)
}
