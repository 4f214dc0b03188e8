use crate::cli::RenderArgs;
use crate::config::PartialFigureConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use mdplot::{
    progress::ProgressReporter,
    render::theme::Theme,
    workflows,
    workflows::report::{FigureReport, PanelOutcome},
};
use tracing::{info, warn};

pub fn run(args: RenderArgs) -> Result<()> {
    let partial_config = PartialFigureConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let theme = match &args.theme {
        Some(path) => {
            info!("Loading theme from {:?}", path);
            Theme::load(path)?
        }
        None => Theme::default(),
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Rendering '{}'...", config.title);
    info!("Invoking the figure workflow...");

    let report = workflows::figure::run(&config, &theme, &reporter)?;

    info!("Workflow finished, wrote {} file(s).", report.outputs.len());
    print_report(&report);

    Ok(())
}

fn print_report(report: &FigureReport) {
    for panel in &report.panels {
        match &panel.outcome {
            PanelOutcome::Series {
                traces,
                points,
                missing_inputs,
            } => {
                println!(
                    "  {}: {} trace(s), {} point(s)",
                    panel.label, traces, points
                );
                for path in missing_inputs {
                    println!("    ! missing input: {}", path.display());
                }
            }
            PanelOutcome::Heatmap {
                rows,
                cols,
                skipped_rows,
                value_range,
            } => {
                println!(
                    "  {}: {}x{} matrix, values {:.3} to {:.3}",
                    panel.label, rows, cols, value_range.0, value_range.1
                );
                if *skipped_rows > 0 {
                    println!("    ! {} malformed row(s) skipped", skipped_rows);
                }
            }
            PanelOutcome::Placeholder { reason } => {
                println!("  {}: placeholder ({})", panel.label, reason.message());
            }
        }
    }

    for path in &report.outputs {
        println!("✓ Figure written to: {}", path.display());
    }

    let placeholders = report.placeholder_count();
    if placeholders > 0 {
        warn!("{} panel(s) fell back to a placeholder.", placeholders);
        println!(
            "Warning: {} panel(s) could not be drawn from their input files.",
            placeholders
        );
    }
}
