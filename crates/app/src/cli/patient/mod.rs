use std::{fs, io, path::Path};

use clap::{Args, Subcommand};
use clinic::patients::PatientRecord;
use clinic_app::domain::patients::PatientsService;
use serde::de::DeserializeOwned;

mod deactivate;
mod register;
mod show;
mod update;

#[derive(Debug, Args)]
pub(crate) struct PatientCommand {
    #[command(subcommand)]
    command: PatientSubcommand,
}

#[derive(Debug, Subcommand)]
enum PatientSubcommand {
    Register(register::RegisterPatientArgs),
    Show(show::ShowPatientArgs),
    Update(update::UpdatePatientArgs),
    Deactivate(deactivate::DeactivatePatientArgs),
}

pub(crate) async fn run(
    command: PatientCommand,
    patients: &dyn PatientsService,
) -> Result<String, String> {
    match command.command {
        PatientSubcommand::Register(args) => register::run(args, patients).await,
        PatientSubcommand::Show(args) => show::run(args, patients).await,
        PatientSubcommand::Update(args) => update::run(args, patients).await,
        PatientSubcommand::Deactivate(args) => deactivate::run(args, patients).await,
    }
}

/// Read a JSON payload from a file, or from stdin when the path is `-`.
fn read_json<T: DeserializeOwned>(source: &Path) -> Result<T, String> {
    let text = if source == Path::new("-") {
        io::read_to_string(io::stdin()).map_err(|error| format!("failed to read stdin: {error}"))?
    } else {
        fs::read_to_string(source)
            .map_err(|error| format!("failed to read {}: {error}", source.display()))?
    };

    serde_json::from_str(&text).map_err(|error| format!("invalid payload: {error}"))
}

fn render(patient: &PatientRecord) -> Result<String, String> {
    serde_json::to_string_pretty(patient)
        .map_err(|error| format!("failed to render patient: {error}"))
}
