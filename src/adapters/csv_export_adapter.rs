//! CSV export adapter: one `label,value` row per export field.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::error::ValuatorError;
use crate::domain::export::ExportRow;
use crate::ports::report_port::{ReportContext, ReportPort};

#[derive(Debug, Default)]
pub struct CsvExportAdapter;

impl CsvExportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize rows, with a `label,value` header, into any writer.
    pub fn write_rows<W: Write>(rows: &[ExportRow], writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvExportAdapter {
    fn write(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ValuatorError> {
        let export_err = |reason: String| ValuatorError::Export {
            path: output_path.display().to_string(),
            reason,
        };
        let file = File::create(output_path).map_err(|e| export_err(e.to_string()))?;
        Self::write_rows(&ctx.rows(), file).map_err(|e| export_err(e.to_string()))
    }
}
