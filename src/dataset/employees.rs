use crate::error::{GenerateError, Result};
use crate::source::{FakeKind, FakeSource, FlagSource};

use super::{DatasetKind, DatasetParams, DatasetSpec, COST_CENTER_DIVISOR};

pub(super) fn register(spec: DatasetSpec, params: &DatasetParams) -> Result<DatasetSpec> {
    let kind = DatasetKind::Employees;
    let seed = params.seed;

    // Each cost center holds COST_CENTER_DIVISOR base rows, scaled by workers per row
    let cost_center_divisor = params
        .worker_multiplier
        .checked_mul(COST_CENTER_DIVISOR)
        .ok_or_else(|| {
            GenerateError::InvalidConfig(format!(
                "worker multiplier too large: {}",
                params.worker_multiplier
            ))
        })?;

    spec.with_ids("EmployeeId", 1)?
        .with_grouped(
            "EmployeeName",
            1,
            FakeSource::new(FakeKind::PersonName, kind.column_seed(seed, 1)),
        )?
        .with_ids("CostCenter", cost_center_divisor)?
        .with_grouped("IsEmployed", 1, FlagSource::new(kind.column_seed(seed, 3)))?
        .with_grouped("IsActive", 1, FlagSource::new(kind.column_seed(seed, 4)))
}
