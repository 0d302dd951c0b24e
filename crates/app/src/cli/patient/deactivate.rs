use clap::Args;
use clinic::ids::PatientId;
use clinic_app::domain::patients::PatientsService;

use crate::cli::describe;

#[derive(Debug, Args)]
pub(crate) struct DeactivatePatientArgs {
    /// Patient identifier
    id: PatientId,
}

pub(crate) async fn run(
    args: DeactivatePatientArgs,
    patients: &dyn PatientsService,
) -> Result<String, String> {
    patients
        .deactivate_patient(args.id)
        .await
        .map_err(|error| describe("failed to deactivate patient", &error))?;

    Ok(format!("patient {} deactivated", args.id))
}
