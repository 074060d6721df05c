pub mod compare;

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::error::{AuditError, Result};
use crate::model::{MismatchReport, ResourceCollection, ResourceKind};
use crate::providers::{get_resource, Provider};
use crate::report;

/// What a run should audit and where results go.
#[derive(Debug, Clone)]
pub struct AuditPlan {
    pub resources: Vec<ResourceKind>,
    pub out_dir: PathBuf,
    /// When set, raw payloads from both systems are archived here.
    pub raw_dir: Option<PathBuf>,
}

impl Default for AuditPlan {
    fn default() -> Self {
        Self {
            resources: vec![ResourceKind::CustomFields],
            out_dir: PathBuf::from("."),
            raw_dir: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub kind: ResourceKind,
    pub report_path: PathBuf,
    pub mismatches: MismatchReport,
}

struct Fetched {
    kind: ResourceKind,
    manage: ResourceCollection,
    grow: ResourceCollection,
    mismatches: MismatchReport,
}

/// Fetches and compares every requested resource, then writes the outputs.
/// Nothing is written unless every fetch succeeded.
#[instrument(level = "info", skip_all, fields(out_dir = %plan.out_dir.display()))]
pub async fn run(
    manage: &dyn Provider,
    grow: &dyn Provider,
    plan: &AuditPlan,
) -> Result<Vec<AuditOutcome>> {
    let mut fetched = Vec::with_capacity(plan.resources.len());
    for &kind in &plan.resources {
        if fetched.iter().any(|f: &Fetched| f.kind == kind) {
            continue;
        }
        let manage_data = get_resource(manage, kind).await?;
        let grow_data = get_resource(grow, kind).await?;
        let mismatches = compare::compare(&manage_data, &grow_data);
        info!(
            resource = %kind,
            manage = manage_data.items.len(),
            grow = grow_data.items.len(),
            mismatches = mismatches.len(),
            "compared"
        );
        let right_only = compare::right_only_names(&manage_data, &grow_data);
        if !right_only.is_empty() {
            debug!(resource = %kind, names = ?right_only, "names only present in grow (not reported)");
        }
        fetched.push(Fetched {
            kind,
            manage: manage_data,
            grow: grow_data,
            mismatches,
        });
    }

    if let Some(raw_dir) = &plan.raw_dir {
        create_dir(raw_dir)?;
        for f in &fetched {
            for (provider, data) in [(manage, &f.manage), (grow, &f.grow)] {
                let name = format!("{}_{}.json", provider.system(), f.kind.endpoint());
                report::json::save_json(&data.raw, &raw_dir.join(name))?;
            }
        }
    }

    create_dir(&plan.out_dir)?;
    let mut outcomes = Vec::with_capacity(fetched.len());
    for f in fetched {
        let report_path = plan.out_dir.join(f.kind.report_file_name());
        report::csv::write(&report_path, &f.mismatches)?;
        outcomes.push(AuditOutcome {
            kind: f.kind,
            report_path,
            mismatches: f.mismatches,
        });
    }
    Ok(outcomes)
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| AuditError::io(dir, e))
}
