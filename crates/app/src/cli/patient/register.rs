use std::path::PathBuf;

use clap::Args;
use clinic::patients::data::RegistrationPayload;
use clinic_app::domain::patients::PatientsService;

use crate::cli::describe;

use super::{read_json, render};

#[derive(Debug, Args)]
pub(crate) struct RegisterPatientArgs {
    /// Registration payload file (`-` for stdin)
    #[arg(long)]
    json: PathBuf,
}

pub(crate) async fn run(
    args: RegisterPatientArgs,
    patients: &dyn PatientsService,
) -> Result<String, String> {
    let payload: RegistrationPayload = read_json(&args.json)?;

    let patient = patients
        .register_patient(payload)
        .await
        .map_err(|error| describe("failed to register patient", &error))?;

    render(&patient)
}
