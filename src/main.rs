//! resumedit - Export resumes to PDF and Word

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use resumedit::docx::DocxExporter;
use resumedit::pdf::{PdfConfig, PdfExporter};
use resumedit::{
    DirectorySaver, ExportController, ExportFormat, ExportOutcome, JsonFileStorage, Session,
    TEMPLATES, ThemeContext, decode_text, parse_blocks, print_html, resolve,
};

#[derive(Parser)]
#[command(name = "resumedit")]
#[command(version, about = "Export resumes to PDF and Word", long_about = None)]
#[command(after_help = "EXAMPLES:
    resumedit export cv.html -t classic -n jane     Write jane.pdf and jane.docx
    resumedit export cv.html -f pdf -o out          Write out/resume.pdf
    resumedit print cv.html -o cv-print.html        Printable HTML page
    resumedit theme --preset highContrast --dark    Theme CSS variables")]
struct Cli {
    /// Show more log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress output messages
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export resume content to PDF and/or Word
    Export {
        /// Editor HTML file ("-" for stdin); defaults to the session content
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "all")]
        format: FormatArg,

        /// Template id (modern, classic, professional)
        #[arg(short, long)]
        template: Option<String>,

        /// Output file name without extension
        #[arg(short = 'n', long = "name")]
        file_name: Option<String>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Session file to load and update
        #[arg(long, value_name = "FILE")]
        session: Option<PathBuf>,

        /// Write uncompressed PDF content streams
        #[arg(long)]
        uncompressed: bool,
    },

    /// List available templates
    Templates,

    /// Render a printable HTML page
    Print {
        /// Editor HTML file ("-" for stdin); defaults to the sample resume
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Template id
        #[arg(short, long)]
        template: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the application theme stylesheet
    Theme {
        /// Preset name (default, highContrast, darkHighContrast, custom)
        #[arg(long)]
        preset: Option<String>,

        /// Switch to dark mode
        #[arg(long)]
        dark: bool,

        /// Session file holding the stored theme
        #[arg(long, value_name = "FILE")]
        session: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Pdf,
    Word,
    All,
}

impl FormatArg {
    fn formats(self) -> &'static [ExportFormat] {
        match self {
            Self::Pdf => &[ExportFormat::Pdf],
            Self::Word => &[ExportFormat::Word],
            Self::All => &ExportFormat::ALL,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Export {
            input,
            format,
            template,
            file_name,
            output,
            session,
            uncompressed,
        } => export(ExportArgs {
            input,
            format,
            template,
            file_name,
            output,
            session,
            uncompressed,
            quiet: cli.quiet,
        }),
        Commands::Templates => {
            list_templates();
            Ok(())
        }
        Commands::Print {
            input,
            template,
            output,
        } => print(input.as_deref(), template.as_deref(), output.as_deref()),
        Commands::Theme {
            preset,
            dark,
            session,
        } => theme(preset.as_deref(), dark, session.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, _) => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_input(path: &Path) -> Result<String, String> {
    let bytes = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("stdin: {e}"))?;
        buf
    } else {
        fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?
    };
    Ok(decode_text(&bytes, None).into_owned())
}

fn select_template(session: &mut Session, template: Option<&str>) -> Result<(), String> {
    match template {
        Some(id) if !session.select_template(id) => Err(format!(
            "unknown template {id:?} (try `resumedit templates`)"
        )),
        _ => Ok(()),
    }
}

struct ExportArgs {
    input: Option<PathBuf>,
    format: FormatArg,
    template: Option<String>,
    file_name: Option<String>,
    output: PathBuf,
    session: Option<PathBuf>,
    uncompressed: bool,
    quiet: bool,
}

fn export(args: ExportArgs) -> Result<(), String> {
    let mut storage = args
        .session
        .as_deref()
        .map(JsonFileStorage::open)
        .transpose()
        .map_err(|e| e.to_string())?;
    let mut session = storage
        .as_ref()
        .map(|s| Session::load(s))
        .unwrap_or_default();

    if let Some(input) = &args.input {
        session.content = read_input(input)?;
    }
    select_template(&mut session, args.template.as_deref())?;
    if let Some(name) = args.file_name {
        session.file_name = name;
    }

    let pdf = PdfExporter::with_config(PdfConfig::default().with_compress(!args.uncompressed));
    let controller =
        ExportController::with_exporters(DirectorySaver::new(&args.output), pdf, DocxExporter::new());
    let request = session.export_request();

    let mut failed = false;
    for &format in args.format.formats() {
        match controller.export(format, &request) {
            ExportOutcome::Saved { file_name, size } => {
                if !args.quiet {
                    let path = args.output.join(&file_name);
                    println!("{format}: {} ({size} bytes)", path.display());
                }
            }
            ExportOutcome::Disabled => {
                eprintln!("{format}: nothing to export, content is empty");
                failed = true;
            }
            ExportOutcome::Busy => {
                eprintln!("{format}: export already in progress");
                failed = true;
            }
            ExportOutcome::Failed(message) => {
                eprintln!("{format}: {message}");
                failed = true;
            }
        }
    }

    if let Some(storage) = storage.as_mut() {
        session.save(storage);
        storage.flush().map_err(|e| e.to_string())?;
    }

    if failed {
        Err("export failed".to_string())
    } else {
        Ok(())
    }
}

fn list_templates() {
    for (i, template) in TEMPLATES.iter().enumerate() {
        let default = if i == 0 { " (default)" } else { "" };
        println!("{}{default}: {}", template.id, template.name);
        println!("    {}", template.description);
        println!("    Font: {}", template.font_family);
        for feature in template.features {
            println!("    - {feature}");
        }
    }
}

fn print(
    input: Option<&Path>,
    template: Option<&str>,
    output: Option<&Path>,
) -> Result<(), String> {
    let mut session = Session::default();
    if let Some(input) = input {
        session.content = read_input(input)?;
    }
    select_template(&mut session, template)?;

    let doc = parse_blocks(&session.content).map_err(|e| e.to_string())?;
    let html = print_html(&doc, &resolve(&session.template_id), &session.file_name);

    match output {
        Some(path) => fs::write(path, html).map_err(|e| format!("{}: {e}", path.display())),
        None => io::stdout()
            .write_all(html.as_bytes())
            .map_err(|e| e.to_string()),
    }
}

fn theme(preset: Option<&str>, dark: bool, session: Option<&Path>) -> Result<(), String> {
    let mut storage = session
        .map(JsonFileStorage::open)
        .transpose()
        .map_err(|e| e.to_string())?;
    let mut ctx = storage
        .as_ref()
        .map(|s| ThemeContext::load(s))
        .unwrap_or_default();

    if let Some(name) = preset
        && !ctx.apply_preset(name)
    {
        return Err(format!("unknown theme preset {name:?}"));
    }
    if dark && !ctx.is_dark() {
        ctx.toggle_dark_mode();
    }

    if let Some(storage) = storage.as_mut() {
        ctx.save(storage).map_err(|e| e.to_string())?;
        storage.flush().map_err(|e| e.to_string())?;
    }

    println!("{}", ctx.stylesheet());
    Ok(())
}
