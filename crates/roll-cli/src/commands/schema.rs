use roll_core::entities::{EligibilityBatch, LectureSessionDetail, StudentEligibility};
use roll_core::snapshot::AttendanceSnapshot;
use roll_core::submission::AttendanceSessionSubmission;
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaName};
use crate::output::output;

/// Handle `rollcall schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_of(args.name), flags.format)
}

fn schema_of(name: SchemaName) -> Schema {
    match name {
        SchemaName::Submission => schema_for!(AttendanceSessionSubmission),
        SchemaName::Snapshot => schema_for!(AttendanceSnapshot),
        SchemaName::Session => schema_for!(LectureSessionDetail),
        SchemaName::EligibilityBatch => schema_for!(EligibilityBatch),
        SchemaName::StudentEligibility => schema_for!(StudentEligibility),
    }
}
