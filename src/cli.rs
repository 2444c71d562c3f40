use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::output;
use crate::pipeline::{self, CleanResult};
use crate::types::{
    ProcessingOptions, DEFAULT_OUTPUT_FILE_NAME, DEFAULT_PREVIEW_ROWS, DEFAULT_SHEET_NAME,
};

/// Standardize addresses and attendants in health records and strip personal names
#[derive(Parser, Debug)]
#[command(name = "records-standardizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean a records file and write the organized workbook
    Clean {
        /// Input file path (CSV, TSV or Excel)
        #[arg(short, long)]
        input: PathBuf,

        /// Output workbook path (defaults to OFFICIAL_CHO_BIRTH_RECORDS.xlsx beside the input)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Write a JSON run report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Name of the sheet in the output workbook
        #[arg(long, default_value = DEFAULT_SHEET_NAME)]
        sheet_name: String,

        /// Print the first rows of the cleaned table to stdout
        #[arg(long, default_value_t = false)]
        preview: bool,

        /// Number of rows shown by --preview
        #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
        preview_rows: usize,

        /// Skip hashing the input file for the report
        #[arg(long, default_value_t = false)]
        no_hash: bool,
    },

    /// Launch the GUI
    Gui,
}

/// GUI Application state
#[derive(Debug, Clone, PartialEq)]
pub enum GuiState {
    Ready,
    Processing,
    Done,
    Error(String),
}

impl Default for GuiState {
    fn default() -> Self {
        GuiState::Ready
    }
}

/// GUI Application
pub struct GuiApp {
    state: GuiState,
    dropped_file: Option<PathBuf>,
    result: Option<CleanResult>,
    notices: Vec<String>,
    options: ProcessingOptions,
}

impl Default for GuiApp {
    fn default() -> Self {
        Self {
            state: GuiState::Ready,
            dropped_file: None,
            result: None,
            notices: Vec::new(),
            options: ProcessingOptions::default(),
        }
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle dropped files
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                if let Some(path) = i.raw.dropped_files[0].path.clone() {
                    self.dropped_file = Some(path);
                    self.state = GuiState::Processing;
                }
            }
        });

        // Process file if needed
        if self.state == GuiState::Processing {
            if let Some(ref path) = self.dropped_file {
                match pipeline::clean_file(path, self.options.clone()) {
                    Ok(result) => {
                        self.result = Some(result);
                        self.state = GuiState::Done;
                    }
                    Err(e) => {
                        log::error!("Failed to clean {}: {}", path.display(), e);
                        self.state = GuiState::Error(e.to_string());
                    }
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("City Health Office | Records Standardizer");
            ui.add_space(10.0);

            match &self.state {
                GuiState::Ready => {
                    self.show_ready_state(ui);
                }
                GuiState::Processing => {
                    ui.spinner();
                    ui.label("Processing file...");
                }
                GuiState::Done => {
                    self.show_done_state(ui);
                }
                GuiState::Error(msg) => {
                    let msg = msg.clone();
                    self.show_error_state(ui, msg);
                }
            }
        });
    }
}

impl GuiApp {
    fn show_ready_state(&mut self, ui: &mut egui::Ui) {
        // Drag and drop zone
        let drop_zone = egui::Frame::none()
            .fill(egui::Color32::from_gray(40))
            .stroke(egui::Stroke::new(2.0, egui::Color32::from_rgb(0x87, 0xb9, 0x7b)))
            .rounding(10.0)
            .inner_margin(40.0);

        drop_zone.show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label("Drag and drop the raw records file here");
                ui.label("(CSV or Excel)");
                ui.add_space(20.0);
                ui.label("or");
                ui.add_space(10.0);
                if ui.button("Browse...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Records files", &["csv", "tsv", "xlsx", "xls"])
                        .pick_file()
                    {
                        self.dropped_file = Some(path);
                        self.state = GuiState::Processing;
                    }
                }
            });
        });

        ui.add_space(20.0);

        // Options
        ui.collapsing("Options", |ui| {
            ui.horizontal(|ui| {
                ui.label("Sheet name:");
                ui.text_edit_singleline(&mut self.options.sheet_name);
            });
            ui.horizontal(|ui| {
                ui.label("Preview rows:");
                let mut rows = self.options.preview_rows as i32;
                if ui.add(egui::Slider::new(&mut rows, 5..=50)).changed() {
                    self.options.preview_rows = rows as usize;
                }
            });
            ui.checkbox(&mut self.options.hash_file, "Compute file hash for report");
        });
    }

    fn show_done_state(&mut self, ui: &mut egui::Ui) {
        let Some(result) = self.result.as_ref() else {
            self.reset();
            return;
        };

        ui.colored_label(
            egui::Color32::from_rgb(0x2e, 0x7d, 0x32),
            result.report.summary.headline(),
        );

        for notice in &self.notices {
            ui.label(notice);
        }
        ui.add_space(10.0);

        let mut should_reset = false;
        let mut workbook_path: Option<PathBuf> = None;
        let mut report_path: Option<PathBuf> = None;

        ui.horizontal(|ui| {
            if ui.button("DOWNLOAD FINAL ORGANIZED FILE").clicked() {
                workbook_path = rfd::FileDialog::new()
                    .add_filter("Excel workbook", &["xlsx"])
                    .set_file_name(DEFAULT_OUTPUT_FILE_NAME)
                    .save_file();
            }

            if ui.button("Save report...").clicked() {
                report_path = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .save_file();
            }

            if ui.button("New file").clicked() {
                should_reset = true;
            }
        });

        ui.add_space(10.0);
        ui.strong("Preview of Cleaned Data");
        egui::ScrollArea::both().max_height(400.0).show(ui, |ui| {
            egui::Grid::new("preview_grid")
                .striped(true)
                .show(ui, |ui| {
                    for column in result.table.columns() {
                        ui.strong(column);
                    }
                    ui.end_row();
                    for row in result.table.head(self.options.preview_rows) {
                        for cell in row {
                            ui.label(cell.to_string());
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some(path) = workbook_path {
            match output::write_workbook_file(&result.table, &self.options.sheet_name, &path) {
                Ok(()) => self
                    .notices
                    .push(format!("Workbook saved to: {}", path.display())),
                Err(e) => {
                    self.state = GuiState::Error(e.to_string());
                    return;
                }
            }
        }

        if let Some(path) = report_path {
            match output::write_report_file(&result.report, &path) {
                Ok(()) => self
                    .notices
                    .push(format!("Report saved to: {}", path.display())),
                Err(e) => {
                    self.state = GuiState::Error(e.to_string());
                    return;
                }
            }
        }

        ui.collapsing("Run report", |ui| {
            match output::report_to_json_string(&result.report) {
                Ok(json) => {
                    let mut text = json.as_str();
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                }
                Err(e) => {
                    ui.colored_label(egui::Color32::RED, e.to_string());
                }
            }
        });

        if should_reset {
            self.reset();
        }
    }

    fn show_error_state(&mut self, ui: &mut egui::Ui, msg: String) {
        ui.colored_label(egui::Color32::RED, format!("Error: {}", msg));
        ui.add_space(20.0);
        if ui.button("Try again").clicked() {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.state = GuiState::Ready;
        self.dropped_file = None;
        self.result = None;
        self.notices.clear();
    }
}
