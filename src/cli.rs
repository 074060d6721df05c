use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::audit::AuditPlan;
use crate::model::ResourceKind;

/// Report custom field and field set drift between Clio Manage and Clio Grow.
///
/// Reads the API token from CLIO_API_KEY. Every name in Manage whose record
/// is missing or different in Grow becomes one CSV row.
#[derive(Debug, Parser)]
#[command(name = "clio-audit", version)]
pub struct Args {
    /// Resource kind to audit; repeat for several. Defaults to custom fields.
    #[arg(short, long = "resource", value_enum)]
    pub resources: Vec<ResourceKind>,

    /// Directory the CSV reports are written to (default: current directory).
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Also archive the raw API payloads as JSON in this directory.
    #[arg(long, value_name = "DIR")]
    pub save_raw: Option<PathBuf>,

    /// Config file with endpoint overrides (default ~/.clio-audit/config.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Starts from the default plan and applies whatever flags were given.
    pub fn plan(&self) -> AuditPlan {
        let mut plan = AuditPlan::default();
        if !self.resources.is_empty() {
            plan.resources = self.resources.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            plan.out_dir = out_dir.clone();
        }
        plan.raw_dir = self.save_raw.clone();
        plan
    }
}
