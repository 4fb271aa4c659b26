use std::path::{Path, PathBuf};

use clap::Parser;
use docx_utility::{BackendKind, Error, Metadata, Settings};

#[derive(Parser)]
#[command(
    name = "docx-utility",
    about = "Convert DOCX files to PDF or print their metadata"
)]
struct Args {
    /// Input DOCX file
    input: PathBuf,
    /// Print document metadata instead of converting
    #[arg(long)]
    info: bool,
    /// Output PDF file (defaults to <output_directory>/<input name>.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// YAML configuration file
    #[arg(short, long, default_value = docx_utility::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Conversion backend: builtin or soffice (overrides the configuration)
    #[arg(long)]
    backend: Option<BackendKind>,
}

fn show_info(input: &Path) -> Result<(), Error> {
    let metadata = docx_utility::get_metadata(input)?;
    for (key, value) in metadata.iter() {
        println!("{}: {value}", Metadata::display_key(key));
    }
    Ok(())
}

fn run_conversion(args: &Args, settings: &Settings) -> Result<(), Error> {
    let output = match &args.output {
        Some(path) => path.clone(),
        None => {
            println!(
                "Arquivo será salvo em: {}",
                settings.output_directory.display()
            );
            let name = args.input.file_name().map_or(args.input.as_path(), Path::new);
            settings
                .output_directory
                .join(docx_utility::default_output_path(name))
        }
    };

    println!(
        "Convertendo '{}' para '{}'...",
        args.input.display(),
        output.display()
    );
    let backend = settings.backend.backend(settings);
    let written = docx_utility::convert(&args.input, Some(&output), backend.as_ref())?;
    println!("Arquivo convertido com sucesso: '{}'", written.display());
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::load(&args.config);
    if let Some(kind) = args.backend {
        settings.backend = kind;
    }
    log::debug!("settings: {settings:?}");

    let result = if args.info {
        show_info(&args.input)
    } else {
        run_conversion(&args, &settings)
    };

    if let Err(e) = result {
        println!("Erro: {e}");
        std::process::exit(e.exit_code());
    }
}
