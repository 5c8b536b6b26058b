use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use log::info;

use qr2scad::{ConvertError, ConvertSettings, EncodeSettings, ScadSettings, encode_qr_image};

#[derive(Parser)]
#[command(
    name = "qr2scad",
    version,
    about = "Convert QR code images to OpenSCAD solid models"
)]
struct Cli {
    /// Input bitmap file (PNG is the reference format)
    infile: PathBuf,

    /// Output OpenSCAD file
    outfile: PathBuf,

    /// Append a qr_code() invocation so the script renders directly
    #[arg(short, long)]
    render: bool,

    /// Echo the generated script to standard output
    #[arg(short, long, action = ArgAction::Count)]
    verbosity: u8,

    /// Generate a QR bitmap for this text, save it to INFILE, then convert it
    #[arg(short, long, value_name = "TEXT")]
    generate: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ConvertError> {
    if let Some(payload) = &cli.generate {
        let bitmap = encode_qr_image(payload, &EncodeSettings::default())?;
        bitmap.save(&cli.infile)?;
        info!(
            "generated QR code for {payload:?}, saved to {}",
            cli.infile.display()
        );
    }

    let settings = ConvertSettings {
        scad: ScadSettings {
            render: cli.render,
            ..Default::default()
        },
        ..Default::default()
    };

    info!(
        "converting {} to {}",
        cli.infile.display(),
        cli.outfile.display()
    );
    let script = qr2scad::convert_file(&cli.infile, &cli.outfile, &settings)?;

    if cli.verbosity > 0 {
        echo(&script)?;
    }
    Ok(())
}

/// Write the script to stdout, treating a closed downstream consumer as
/// normal early termination rather than an error.
fn echo(script: &str) -> Result<(), ConvertError> {
    let mut stdout = io::stdout().lock();
    let result = stdout
        .write_all(script.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"));
    match result {
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other.map_err(ConvertError::from),
    }
}
