use clap::Args;
use clinic::ids::PatientId;
use clinic_app::domain::patients::PatientsService;

use crate::cli::describe;

use super::render;

#[derive(Debug, Args)]
pub(crate) struct ShowPatientArgs {
    /// Patient identifier
    id: PatientId,
}

pub(crate) async fn run(
    args: ShowPatientArgs,
    patients: &dyn PatientsService,
) -> Result<String, String> {
    let patient = patients
        .get_patient(args.id)
        .await
        .map_err(|error| describe("failed to fetch patient", &error))?;

    render(&patient)
}
