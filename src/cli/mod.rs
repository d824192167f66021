// CLI module
// Command-line interface, argument parsing and terminal output

mod args;
pub mod render;

pub use args::{CliArgs, Command, ImportArgs};

use crate::client::HttpScanClient;
use crate::core::orchestrator::JobOrchestrator;
use crate::core::traits::ScanBackend;
use crate::core::view::ViewController;
use crate::io::{render_export, write_export};
use crate::types::{JobState, ViewerError};
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tracing::warn;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or `--help`),
/// clap displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Run the parsed command against the configured server
///
/// Listings go to `output`; progress lines go to stderr.
pub async fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), ViewerError> {
    let backend = Arc::new(HttpScanClient::new(args.to_client_config()));
    run_with_backend(backend, args, output).await
}

/// Run the parsed command against any backend
pub async fn run_with_backend<B>(
    backend: Arc<B>,
    args: &CliArgs,
    output: &mut dyn Write,
) -> Result<(), ViewerError>
where
    B: ScanBackend + ?Sized + 'static,
{
    let mut orchestrator = JobOrchestrator::new(backend, args.to_poll_config());

    match &args.command {
        Command::Height => {
            let height = orchestrator.fetch_height().await?;
            writeln!(output, "Current height: {}", height)?;
        }
        Command::Import(import) => {
            let mut view = ViewController::new();
            run_import(&mut orchestrator, &mut view, import, output).await?;
        }
    }

    Ok(())
}

async fn run_import<B>(
    orchestrator: &mut JobOrchestrator<B>,
    view: &mut ViewController,
    import: &ImportArgs,
    output: &mut dyn Write,
) -> Result<(), ViewerError>
where
    B: ScanBackend + ?Sized + 'static,
{
    orchestrator.submit(&import.to_form()).await?;
    report_progress(orchestrator);

    while let Some(state) = orchestrator.next_event().await {
        if matches!(state, JobState::Polling { .. }) {
            report_progress(orchestrator);
        }
    }

    let result = match orchestrator.state() {
        JobState::Succeeded(result) => result.clone(),
        JobState::Failed { error } => {
            return Err(ViewerError::Server {
                message: error.clone(),
            })
        }
        other => {
            return Err(ViewerError::Server {
                message: format!("Job ended in unexpected state: {}", other.name()),
            })
        }
    };

    eprintln!("{}", render::render_summary(&result));
    view.load(result);
    import.apply_to(view);

    let page = view.current_page();
    write!(output, "{}", render::render_page(&page))?;

    for format in &import.exports {
        match render_export(view, *format) {
            Ok(file) => {
                let path = write_export(&file, &import.out_dir).await?;
                eprintln!("Wrote {} export to {}", format, path.display());
            }
            Err(ViewerError::NothingToExport { notice }) => {
                warn!(format = %format, "export skipped");
                eprintln!("{}", notice);
            }
            Err(error) => return Err(error),
        }
    }

    Ok(())
}

fn report_progress<B>(orchestrator: &JobOrchestrator<B>)
where
    B: ScanBackend + ?Sized + 'static,
{
    if let Some(status) = orchestrator.status_text() {
        eprintln!("{}", render::render_progress(&status, orchestrator.percent()));
    }
}
