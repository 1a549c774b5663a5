//! Unit tests for batch module

use data_sandbox::batch::Batch;
use data_sandbox::column::{ColumnValues, IdColumn};
use data_sandbox::dataset::DatasetSpec;
use data_sandbox::source::{Counter, Enumerate};
use data_sandbox::GenerateError;

#[test]
fn test_assembler_window_sizes() {
    let spec = DatasetSpec::new("t", 10, 4)
        .unwrap()
        .with_ids("id", 1)
        .unwrap()
        .with_grouped("n", 3, Counter::new(0))
        .unwrap();
    assert_eq!(spec.batch_count(), 3);

    let batches: Vec<Batch> = spec.into_batches().collect::<Result<_, _>>().unwrap();
    let sizes: Vec<usize> = batches.iter().map(|b| b.num_rows()).collect();
    assert_eq!(sizes, vec![4, 4, 2]);

    let indices: Vec<usize> = batches.iter().map(|b| b.index()).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    assert_eq!(
        batches[1].column("n"),
        Some(&ColumnValues::Int64(vec![1, 1, 2, 2]))
    );
    assert!(batches[1].column("missing").is_none());
}

#[test]
fn test_assembler_keeps_insertion_order() {
    let spec = DatasetSpec::new("t", 3, 10)
        .unwrap()
        .with_ids("z", 1)
        .unwrap()
        .with_ids("a", 1)
        .unwrap()
        .with_ids("m", 1)
        .unwrap();

    let batch = spec.into_batches().next().unwrap().unwrap();
    let names: Vec<&str> = batch.columns().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["z", "a", "m"]);
    assert_eq!(batch.num_columns(), 3);
}

#[test]
fn test_single_batch_when_batch_size_exceeds_rows() {
    let spec = DatasetSpec::new("t", 5, 1_000).unwrap().with_ids("id", 1).unwrap();
    let mut batches = spec.into_batches();
    assert_eq!(batches.next().unwrap().unwrap().num_rows(), 5);
    assert!(batches.next().is_none());
}

#[test]
fn test_short_column_fails_with_premature_exhaustion() {
    let spec = DatasetSpec::new("t", 10, 4)
        .unwrap()
        .with_ids("ok", 1)
        .unwrap()
        .with_stream("short", Box::new(IdColumn::new(6, 1).unwrap()));

    let mut batches = spec.into_batches();
    assert_eq!(batches.next().unwrap().unwrap().num_rows(), 4);

    match batches.next() {
        Some(Err(GenerateError::PrematureExhaustion {
            column,
            batch,
            expected,
            produced,
        })) => {
            assert_eq!(column, "short");
            assert_eq!(batch, 1);
            assert_eq!(expected, 4);
            assert_eq!(produced, 2);
        }
        other => panic!("expected PrematureExhaustion, got {:?}", other),
    }
    assert!(batches.next().is_none());
}

#[test]
fn test_column_with_nothing_left_fails_with_premature_exhaustion() {
    let spec = DatasetSpec::new("t", 10, 4)
        .unwrap()
        .with_ids("ok", 1)
        .unwrap()
        .with_stream("empty_later", Box::new(IdColumn::new(4, 1).unwrap()));

    let mut batches = spec.into_batches();
    assert_eq!(batches.next().unwrap().unwrap().num_rows(), 4);

    match batches.next() {
        Some(Err(GenerateError::PrematureExhaustion {
            column,
            batch,
            expected,
            produced,
        })) => {
            assert_eq!(column, "empty_later");
            assert_eq!(batch, 1);
            assert_eq!(expected, 4);
            assert_eq!(produced, 0);
        }
        other => panic!("expected PrematureExhaustion, got {:?}", other),
    }
    assert!(batches.next().is_none());
}

#[test]
fn test_exhaustion_message_names_column() {
    let spec = DatasetSpec::new("t", 4, 4)
        .unwrap()
        .with_stream("tiny", Box::new(IdColumn::new(1, 1).unwrap()));

    let err = spec.into_batches().next().unwrap().unwrap_err();
    assert!(err.to_string().contains("column tiny"));
}

#[test]
fn test_generator_failure_aborts_assembly() {
    let spec = DatasetSpec::new("t", 5, 10)
        .unwrap()
        .with_grouped("v", 1, Enumerate::new(vec![1i64, 2]))
        .unwrap();

    let mut batches = spec.into_batches();
    match batches.next() {
        Some(Err(GenerateError::GeneratorFailure { group, .. })) => assert_eq!(group, 2),
        other => panic!("expected GeneratorFailure, got {:?}", other),
    }
    assert!(batches.next().is_none());
}

#[test]
fn test_rows_produced_and_remaining() {
    let spec = DatasetSpec::new("t", 7, 3).unwrap().with_ids("id", 2).unwrap();
    let mut batches = spec.into_batches();
    assert_eq!(batches.batches_remaining(), 3);

    batches.next();
    assert_eq!(batches.rows_produced(), 3);
    assert_eq!(batches.batches_remaining(), 2);

    let rest: Vec<_> = batches.by_ref().collect();
    assert_eq!(rest.len(), 2);
    assert_eq!(batches.rows_produced(), 7);
    assert_eq!(batches.total_rows(), 7);
}
