mod cli;
mod error;
mod gazetteer;
mod inference;
mod output;
mod pipeline;
mod readers;
mod standardize;
mod transform;
mod types;

use clap::Parser;
use cli::{Cli, Commands};
use error::Error;
use types::{Result, DEFAULT_OUTPUT_FILE_NAME};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Clean {
            input,
            out,
            report,
            sheet_name,
            preview,
            preview_rows,
            no_hash,
        }) => {
            let options = types::ProcessingOptions {
                sheet_name,
                preview_rows,
                hash_file: !no_hash,
            };

            let out_path = out.unwrap_or_else(|| input.with_file_name(DEFAULT_OUTPUT_FILE_NAME));
            if out_path == input {
                return Err(Error::InvalidInput(format!(
                    "Output path {} would overwrite the input file",
                    out_path.display()
                )));
            }

            let result = pipeline::clean_file(&input, options.clone())?;

            output::write_workbook_file(&result.table, &options.sheet_name, &out_path)?;
            eprintln!("Cleaned workbook written to: {}", out_path.display());

            if let Some(report_path) = report {
                output::write_report_file(&result.report, &report_path)?;
                eprintln!("Run report written to: {}", report_path.display());
            }

            if preview {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                output::write_preview(&result.table, options.preview_rows, &mut handle)?;
            }
        }
        Some(Commands::Gui) | None => {
            #[cfg(not(target_arch = "wasm32"))]
            {
                run_gui()?;
            }
            #[cfg(target_arch = "wasm32")]
            {
                eprintln!("GUI not supported on this platform");
            }
        }
    }

    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn run_gui() -> Result<()> {
    use crate::cli::GuiApp;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Records Standardizer",
        options,
        Box::new(|_cc| Box::new(GuiApp::default())),
    )
    .map_err(|e| Error::InvalidInput(format!("GUI error: {}", e)))?;

    Ok(())
}
