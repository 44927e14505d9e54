//! Report output port trait.

use std::path::Path;

use chrono::NaiveDate;

use crate::domain::engine::{ValuationRequest, ValuationResult};
use crate::domain::error::ValuatorError;
use crate::domain::export::{export_rows, ExportRow};
use crate::domain::session::Session;

/// Everything an output sink needs to render one valuation.
pub struct ReportContext<'a> {
    pub request: &'a ValuationRequest,
    pub result: &'a ValuationResult,
    pub session: &'a Session,
    pub prepared_on: NaiveDate,
}

impl ReportContext<'_> {
    pub fn rows(&self) -> Vec<ExportRow> {
        export_rows(self.request, self.result)
    }
}

/// Port for writing valuation reports.
pub trait ReportPort {
    fn write(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ValuatorError>;
}
