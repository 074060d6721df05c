use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::error::{AuditError, Result};
use crate::model::MismatchReport;

pub const HEADER: [&str; 3] = ["name", "manage", "grow"];

pub fn format(report: &MismatchReport) -> Result<String> {
    let mut out = String::new();
    push_row(&mut out, &HEADER);
    for (name, mismatch) in report {
        let manage = serde_json::to_string(&mismatch.manage)?;
        let grow = serde_json::to_string(&mismatch.grow)?;
        push_row(&mut out, &[name.as_str(), manage.as_str(), grow.as_str()]);
    }
    Ok(out)
}

/// Writes the report, replacing any existing file.
pub fn write(path: &Path, report: &MismatchReport) -> Result<()> {
    let contents = format(report)?;
    std::fs::write(path, contents).map_err(|e| AuditError::io(path, e))?;
    info!(path = %path.display(), rows = report.len(), "wrote CSV report");
    Ok(())
}

fn push_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        let _ = write!(out, "\"{}\"", field.replace('"', "\"\""));
    } else {
        out.push_str(field);
    }
}
