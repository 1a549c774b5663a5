//! Unit tests for writer and table modules

use arrow::array::{AsArray, RecordBatch};
use arrow::datatypes::Int64Type;
use data_sandbox::batch::Batch;
use data_sandbox::column::IdColumn;
use data_sandbox::dataset::{DatasetKind, DatasetParams, DatasetSpec};
use data_sandbox::table::read_table;
use data_sandbox::writer::{write_dataset, AppendMode, RewriteAppender, StreamAppender, Appender};
use data_sandbox::GenerateError;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::{self, File};
use std::path::Path;
use tempfile::TempDir;

fn params() -> DatasetParams {
    DatasetParams {
        num_rows: 25,
        seed: 3,
        worker_multiplier: 2,
        time_multiplier: 2,
    }
}

fn write_kind(path: &Path, kind: DatasetKind, batch_size: usize, mode: AppendMode) -> usize {
    let spec = DatasetSpec::for_kind(kind, &params(), batch_size).unwrap();
    write_dataset(path, spec.into_batches(), mode).unwrap().batches
}

fn int_column(table: &RecordBatch, name: &str) -> Vec<i64> {
    table
        .column_by_name(name)
        .unwrap()
        .as_primitive::<Int64Type>()
        .values()
        .to_vec()
}

fn str_column(table: &RecordBatch, name: &str) -> Vec<String> {
    table
        .column_by_name(name)
        .unwrap()
        .as_string::<i32>()
        .iter()
        .map(|v| v.unwrap().to_string())
        .collect()
}

fn row_groups(path: &Path) -> usize {
    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path).unwrap()).unwrap();
    builder.metadata().num_row_groups()
}

#[test]
fn test_rewrite_concatenates_batches_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cost_centers.parquet");

    let batches = write_kind(&path, DatasetKind::CostCenters, 10, AppendMode::Rewrite);
    assert_eq!(batches, 3);

    let table = read_table(&path).unwrap();
    assert_eq!(table.num_rows(), 25);
    assert_eq!(int_column(&table, "CompanyNumber"), (1..=25).collect::<Vec<i64>>());
    assert_eq!(
        int_column(&table, "CostCenter"),
        vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3]
    );
}

#[test]
fn test_batch_size_does_not_change_content() {
    let temp_dir = TempDir::new().unwrap();
    let mut tables = Vec::new();

    for batch_size in [1, 3, 1000] {
        let path = temp_dir.path().join(format!("employees_{batch_size}.parquet"));
        write_kind(&path, DatasetKind::Employees, batch_size, AppendMode::Rewrite);
        tables.push(read_table(&path).unwrap());
    }

    for table in &tables[1..] {
        assert_eq!(table.num_rows(), tables[0].num_rows());
        for column in ["EmployeeId", "CostCenter", "IsEmployed", "IsActive"] {
            assert_eq!(int_column(table, column), int_column(&tables[0], column));
        }
        assert_eq!(
            str_column(table, "EmployeeName"),
            str_column(&tables[0], "EmployeeName")
        );
    }
}

#[test]
fn test_stream_and_rewrite_produce_same_rows() {
    let temp_dir = TempDir::new().unwrap();
    let rewrite = temp_dir.path().join("rewrite.parquet");
    let stream = temp_dir.path().join("stream.parquet");

    write_kind(&rewrite, DatasetKind::WorkingTime, 7, AppendMode::Rewrite);
    let batches = write_kind(&stream, DatasetKind::WorkingTime, 7, AppendMode::Stream);
    assert_eq!(batches, 8);

    let a = read_table(&rewrite).unwrap();
    let b = read_table(&stream).unwrap();
    assert_eq!(a.num_rows(), 50);
    assert_eq!(int_column(&a, "EmployeeId"), int_column(&b, "EmployeeId"));
    assert_eq!(str_column(&a, "Date"), str_column(&b, "Date"));
    assert_eq!(str_column(&a, "WorkingTime"), str_column(&b, "WorkingTime"));

    assert_eq!(row_groups(&stream), 8);
    assert_eq!(row_groups(&rewrite), 1);
}

#[test]
fn test_columns_are_non_nullable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cc.parquet");
    write_kind(&path, DatasetKind::CostCenters, 100, AppendMode::Rewrite);

    let table = read_table(&path).unwrap();
    assert!(table.schema().fields().iter().all(|f| !f.is_nullable()));
}

#[test]
fn test_empty_batch_sequence_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.parquet");

    let result = write_dataset(&path, Vec::<Result<Batch, GenerateError>>::new(), AppendMode::Rewrite);
    match result {
        Err(GenerateError::EmptyDataset { path: reported }) => assert_eq!(reported, path),
        other => panic!("expected EmptyDataset, got {:?}", other),
    }
    assert!(!path.exists());
}

#[test]
fn test_first_batch_replaces_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cost_centers.parquet");
    fs::write(&path, b"not parquet").unwrap();

    write_kind(&path, DatasetKind::CostCenters, 100, AppendMode::Rewrite);
    assert_eq!(read_table(&path).unwrap().num_rows(), 25);

    // A second run replaces the first instead of appending to it
    write_kind(&path, DatasetKind::CostCenters, 10, AppendMode::Stream);
    assert_eq!(read_table(&path).unwrap().num_rows(), 25);
}

#[test]
fn test_failure_keeps_batches_already_written() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.parquet");

    let spec = DatasetSpec::new("broken", 10, 4)
        .unwrap()
        .with_ids("ok", 1)
        .unwrap()
        .with_stream("short", Box::new(IdColumn::new(6, 1).unwrap()));

    let err = write_dataset(&path, spec.into_batches(), AppendMode::Rewrite).unwrap_err();
    assert!(matches!(err, GenerateError::PrematureExhaustion { .. }));

    let table = read_table(&path).unwrap();
    assert_eq!(table.num_rows(), 4);
    assert_eq!(int_column(&table, "ok"), vec![1, 2, 3, 4]);
}

#[test]
fn test_stream_failure_keeps_batches_already_written() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken_stream.parquet");

    let spec = DatasetSpec::new("broken", 10, 4)
        .unwrap()
        .with_ids("ok", 1)
        .unwrap()
        .with_stream("short", Box::new(IdColumn::new(6, 1).unwrap()));

    let err = write_dataset(&path, spec.into_batches(), AppendMode::Stream).unwrap_err();
    assert!(matches!(err, GenerateError::PrematureExhaustion { .. }));

    let table = read_table(&path).unwrap();
    assert_eq!(table.num_rows(), 4);
    assert_eq!(int_column(&table, "ok"), vec![1, 2, 3, 4]);
}

#[cfg(unix)]
#[test]
fn test_append_modes_give_same_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let rewrite = temp_dir.path().join("rewrite.parquet");
    let stream = temp_dir.path().join("stream.parquet");
    write_kind(&rewrite, DatasetKind::CostCenters, 7, AppendMode::Rewrite);
    write_kind(&stream, DatasetKind::CostCenters, 7, AppendMode::Stream);

    let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&rewrite), mode(&stream));
}

#[test]
fn test_failure_in_first_batch_leaves_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("none.parquet");

    let spec = DatasetSpec::new("none", 10, 4)
        .unwrap()
        .with_stream("short", Box::new(IdColumn::new(2, 1).unwrap()));

    assert!(write_dataset(&path, spec.into_batches(), AppendMode::Rewrite).is_err());
    assert!(!path.exists());
}

#[test]
fn test_stream_appender_requires_create() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("s.parquet");

    let spec = DatasetSpec::new("s", 2, 2).unwrap().with_ids("id", 1).unwrap();
    let batch = spec.into_batches().next().unwrap().unwrap();
    let record = data_sandbox::table::to_record_batch(&batch).unwrap();

    let mut appender = StreamAppender::new(&path);
    assert!(matches!(appender.append(&record), Err(GenerateError::Io(_))));

    appender.create(&record).unwrap();
    appender.append(&record).unwrap();
    appender.finish().unwrap();
    assert_eq!(read_table(&path).unwrap().num_rows(), 4);
}

#[test]
fn test_rewrite_appender_direct_use() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("r.parquet");

    let spec = DatasetSpec::new("r", 6, 3).unwrap().with_ids("id", 1).unwrap();
    let records: Vec<RecordBatch> = spec
        .into_batches()
        .map(|b| data_sandbox::table::to_record_batch(&b.unwrap()).unwrap())
        .collect();

    let mut appender = RewriteAppender::new(&path);
    appender.create(&records[0]).unwrap();
    assert_eq!(read_table(&path).unwrap().num_rows(), 3);
    appender.append(&records[1]).unwrap();
    appender.finish().unwrap();
    assert_eq!(int_column(&read_table(&path).unwrap(), "id"), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_append_mode_parsing() {
    assert_eq!("rewrite".parse::<AppendMode>().unwrap(), AppendMode::Rewrite);
    assert_eq!("STREAM".parse::<AppendMode>().unwrap(), AppendMode::Stream);
    assert_eq!(AppendMode::default(), AppendMode::Rewrite);
    assert_eq!(AppendMode::Stream.to_string(), "stream");

    let err = "append".parse::<AppendMode>().unwrap_err();
    assert!(err.contains("Valid options: rewrite, stream"));
}
