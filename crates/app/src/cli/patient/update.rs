use std::path::PathBuf;

use clap::Args;
use clinic::{ids::PatientId, patients::data::UpdatePayload};
use clinic_app::domain::patients::PatientsService;

use crate::cli::describe;

use super::{read_json, render};

#[derive(Debug, Args)]
pub(crate) struct UpdatePatientArgs {
    /// Patient identifier
    id: PatientId,

    /// Update payload file (`-` for stdin); omitted fields are left unchanged
    #[arg(long)]
    json: PathBuf,
}

pub(crate) async fn run(
    args: UpdatePatientArgs,
    patients: &dyn PatientsService,
) -> Result<String, String> {
    let update: UpdatePayload = read_json(&args.json)?;

    let patient = patients
        .update_patient(args.id, update)
        .await
        .map_err(|error| describe("failed to update patient", &error))?;

    render(&patient)
}
