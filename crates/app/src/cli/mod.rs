use std::error::Error;

use clap::{Parser, Subcommand};
use clinic_app::{
    config::{LoggingConfig, StoreConfig},
    context::AppContext,
    observability,
};

mod patient;

#[derive(Debug, Parser)]
#[command(name = "clinic-app", about = "Clinic patient records CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    store: StoreConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Patient(patient::PatientCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<String, String> {
        observability::init_subscriber(&self.logging)
            .map_err(|error| describe("failed to initialise logging", &error))?;

        let context = AppContext::from_config(&self.store)
            .await
            .map_err(|error| describe("failed to start", &error))?;

        match self.command {
            Commands::Patient(command) => patient::run(command, context.patients.as_ref()).await,
        }
    }
}

/// Render an error and its sources as one line.
pub(crate) fn describe(context: &str, error: &dyn Error) -> String {
    let mut message = format!("{context}: {error}");
    let mut source = error.source();

    while let Some(error) = source {
        message.push_str(": ");
        message.push_str(&error.to_string());
        source = error.source();
    }

    message
}
