use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

use crate::error::{AuditError, Result};

/// Pretty JSON with four-space indentation. serde_json leaves non-ASCII
/// characters unescaped.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let contents = to_pretty_string(value)?;
    std::fs::write(path, contents).map_err(|e| AuditError::io(path, e))?;
    info!(path = %path.display(), "saved JSON");
    Ok(())
}
