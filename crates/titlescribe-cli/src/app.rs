//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use titlescribe_core::diagnostics::Diagnostics;
use titlescribe_core::{deed_preview, render_history, FieldRegistry, ParcelField, TemplateLookup};
use titlescribe_ooxml::render::deed_rows;
use titlescribe_ooxml::{
    render_text_preview, Composer, PreviewLine, PreviewSegment, ReportData, ScanReport, Template,
};

use crate::config::Settings;
use crate::data::{ReportFile, TemplateFile};

/// Output format for scan results
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "titlescribe")]
#[command(author, version, about = "Legal scrutiny reports from Word templates", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v for debug output)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the fields, regions and unsupported tags of a template
    Scan {
        /// Template DOCX file
        template: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Compose a report from a template and a data file
    Render {
        /// Template DOCX file
        template: PathBuf,

        /// Report data (TOML or JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Per-deed-type narrative templates (TOML or JSON)
        #[arg(long)]
        histories: Option<PathBuf>,

        /// Output DOCX file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print a plain-text preview of the report
    Preview {
        /// Template DOCX file
        template: PathBuf,

        /// Report data (TOML or JSON)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Per-deed-type narrative templates (TOML or JSON)
        #[arg(long)]
        histories: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// Parses arguments, installs the logger and dispatches to the command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Scan { template, format } => {
            scan_command(&template, format)?;
        }
        Commands::Render {
            template,
            data,
            histories,
            output,
            config,
        } => {
            render_command(
                &template,
                &data,
                histories.as_deref(),
                output.as_deref(),
                config.as_deref(),
            )?;
        }
        Commands::Preview {
            template,
            data,
            histories,
            config,
        } => {
            preview_command(
                &template,
                data.as_deref(),
                histories.as_deref(),
                config.as_deref(),
            )?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = if verbose > 0 { "debug" } else { "warn" };
    // A logger may already be installed when commands run inside tests
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn load_template(path: &Path) -> Result<Template> {
    if !path.exists() {
        anyhow::bail!("Template file not found: {}", path.display());
    }
    Template::load(path).with_context(|| format!("Failed to open template: {}", path.display()))
}

fn load_histories(path: Option<&Path>) -> Result<TemplateFile> {
    match path {
        Some(p) => TemplateFile::load(p),
        None => Ok(TemplateFile::default()),
    }
}

/// Registry with one entry per scanned field, filled from the data file
fn fields_for(report: &ScanReport, data: &ReportFile) -> FieldRegistry {
    let mut fields = report.field_registry();
    fields.fill_from(&data.fields);

    let unknown: Vec<&str> = data
        .fields
        .entries()
        .map(|(name, _)| name)
        .filter(|name| !fields.contains(name))
        .collect();
    if !unknown.is_empty() {
        log::warn!("Ignoring values for fields not in the template: {}", unknown.join(", "));
    }
    fields
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    for diag in diagnostics.iter() {
        println!("{}", diag);
        println!();
    }
}

/// Execute the scan command
pub fn scan_command(template_path: &Path, format: OutputFormat) -> Result<ScanReport> {
    let template = load_template(template_path)?;
    let report = template.scan();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize scan report to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("titlescribe v{}", titlescribe_core::VERSION);
            println!("Template: {}", template_path.display());
            println!();
            println!("Fields ({}):", report.fields.len());
            for field in &report.fields {
                println!("  - {}", field);
            }
            println!();
            println!("Regions:");
            println!("  {{{{table}}}}   deeds table      {}", yes_no(report.has_table));
            println!("  {{{{table1}}}}  parcel details   {}", yes_no(report.has_table1));
            println!("  {{$history}}  history of title {}", yes_no(report.has_history));

            let warnings = report.warnings();
            if !warnings.is_empty() {
                println!();
                print_diagnostics(&warnings);
                println!("Found {} warning(s)", warnings.warning_count());
            }
        }
    }

    Ok(report)
}

fn yes_no(present: bool) -> &'static str {
    if present {
        "yes"
    } else {
        "no"
    }
}

/// Execute the render command, returning the path written
pub fn render_command(
    template_path: &Path,
    data_path: &Path,
    histories: Option<&Path>,
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<PathBuf> {
    println!("titlescribe v{}", titlescribe_core::VERSION);
    println!("Rendering: {}", template_path.display());

    let settings = Settings::load(config)?;
    let template = load_template(template_path)?;
    let data = ReportFile::load(data_path)?;
    let templates = load_histories(histories)?;

    let fields = fields_for(&template.scan(), &data);
    let report_data = ReportData::new(&fields)
        .with_deeds(&data.deeds)
        .with_parcels(&data.parcels);

    let composer = Composer::new()
        .with_options(settings.compose_options())
        .with_templates(&templates);
    let report = composer
        .compose(&template, &report_data)
        .with_context(|| format!("Failed to compose report from {}", template_path.display()))?;

    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(&report.file_name),
    };
    fs::write(&output_path, &report.bytes)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    print_diagnostics(&report.warnings);
    println!("  Created: {}", output_path.display());

    if report.warnings.has_errors() {
        anyhow::bail!(
            "Report written with errors: {} may not open in Word",
            output_path.display()
        );
    }

    Ok(output_path)
}

/// Execute the preview command
pub fn preview_command(
    template_path: &Path,
    data_path: Option<&Path>,
    histories: Option<&Path>,
    config: Option<&Path>,
) -> Result<()> {
    let settings = Settings::load(config)?;
    let template = load_template(template_path)?;
    let data = match data_path {
        Some(p) => ReportFile::load(p)?,
        None => ReportFile::default(),
    };
    let templates = load_histories(histories)?;

    let fields = fields_for(&template.scan(), &data);
    let lookup = TemplateLookup::load(&templates).unwrap_or_else(|e| {
        log::warn!("Narrative template lookup failed: {}", e);
        TemplateLookup::empty()
    });
    let history = render_history(&data.deeds, &lookup);

    let segments = render_text_preview(
        &template.text(),
        &fields,
        &history,
        &settings.preview.empty_history_text,
    );
    print!("{}", format_preview(&segments, &data));

    if !data.deeds.is_empty() {
        println!();
        println!("Deeds entered:");
        for (i, deed) in data.deeds.iter().enumerate() {
            println!(
                "  {}. {}",
                i + 1,
                deed_preview(deed, templates.find(&deed.deed_type))
            );
        }
    }
    Ok(())
}

/// Render preview segments as terminal text
pub fn format_preview(segments: &[PreviewSegment], data: &ReportFile) -> String {
    let mut out = String::new();

    for segment in segments {
        match segment {
            PreviewSegment::Text(lines) => {
                for line in lines {
                    match line {
                        PreviewLine::Heading(text) => {
                            out.push_str(text);
                            out.push('\n');
                            out.push_str(&"-".repeat(text.chars().count()));
                            out.push('\n');
                        }
                        PreviewLine::Paragraph(text) => {
                            out.push_str(text);
                            out.push('\n');
                        }
                        PreviewLine::Blank => out.push('\n'),
                    }
                }
            }
            PreviewSegment::DeedsTable => {
                let rows = deed_rows(&data.deeds);
                if rows.is_empty() {
                    out.push_str(titlescribe_ooxml::render::NO_DEEDS_TEXT);
                    out.push('\n');
                } else {
                    out.push_str("Sno | Date | D.No | Particulars of Deed | Nature of Doc\n");
                    for row in rows {
                        out.push_str(&row.cells().join(" | "));
                        out.push('\n');
                    }
                }
            }
            PreviewSegment::ParcelTable => {
                if data.parcels.is_empty() {
                    out.push_str(titlescribe_ooxml::render::NO_PARCELS_TEXT);
                    out.push('\n');
                }
                for parcel in &data.parcels {
                    out.push_str(&format!(
                        "As per Doc No : {}\n",
                        parcel.display(ParcelField::DocNo)
                    ));
                    for field in ParcelField::DEFINITIONS
                        .into_iter()
                        .chain(ParcelField::BOUNDARIES)
                        .chain(ParcelField::MEASUREMENTS)
                    {
                        out.push_str(&format!("  {}: {}\n", field.label(), parcel.display(field)));
                    }
                }
            }
        }
    }

    out
}
