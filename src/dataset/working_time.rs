use crate::error::Result;
use crate::source::{FakeKind, FakeSource};

use super::{DatasetKind, DatasetParams, DatasetSpec};

const FIRST_YEAR: i32 = 2000;
const LAST_YEAR: i32 = 2025;
const MIN_WORK_TIME: i64 = 1;
const MAX_WORK_TIME: i64 = 99_999;

pub(super) fn register(spec: DatasetSpec, params: &DatasetParams) -> Result<DatasetSpec> {
    let kind = DatasetKind::WorkingTime;
    let seed = params.seed;

    spec.with_ids("EmployeeId", params.worker_multiplier)?
        .with_grouped(
            "Date",
            1,
            FakeSource::new(
                FakeKind::MonthYear {
                    low: FIRST_YEAR,
                    high: LAST_YEAR,
                },
                kind.column_seed(seed, 1),
            ),
        )?
        .with_grouped(
            "WorkingTime",
            1,
            FakeSource::new(
                FakeKind::WorkTime {
                    low: MIN_WORK_TIME,
                    high: MAX_WORK_TIME,
                },
                kind.column_seed(seed, 2),
            ),
        )
}
