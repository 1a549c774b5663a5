use crate::error::Result;
use crate::source::{FakeKind, FakeSource};

use super::{DatasetKind, DatasetSpec};

/// Rows sharing one cost center id
pub const COST_CENTER_DIVISOR: u64 = 10;

const CENTER_NAME_DIVISOR: u64 = 100;
const SUB_ORGANISATION_DIVISOR: u64 = 1_000;
const ORGANISATION_DIVISOR: u64 = 10_000;
const COMPANY_DIVISOR: u64 = 1_000_000;

pub(super) fn register(spec: DatasetSpec, seed: u64) -> Result<DatasetSpec> {
    let kind = DatasetKind::CostCenters;
    let company = |column| FakeSource::new(FakeKind::CompanyName, kind.column_seed(seed, column));

    spec.with_ids("CostCenter", COST_CENTER_DIVISOR)?
        .with_grouped("CostCenterName", CENTER_NAME_DIVISOR, company(1))?
        .with_grouped("SubOrganisation", SUB_ORGANISATION_DIVISOR, company(2))?
        .with_grouped("Organisation", ORGANISATION_DIVISOR, company(3))?
        .with_grouped("CompanyName", COMPANY_DIVISOR, company(4))?
        .with_ids("CompanyNumber", COMPANY_DIVISOR)
}
