use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use xorcrypt::engine::{transform, TransformRequest};
use xorcrypt::key::{Key, MIN_KEY_LENGTH};
use xorcrypt::progress::TerminalBar;

#[derive(Parser)]
#[command(name = "xorcrypt", version, about = "Repeating-key XOR file encryption and decryption")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file with a repeating key
    Encrypt {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Key on the command line (prompted for with echo off when omitted)
        #[arg(short, long)]
        key: Option<String>,
        /// Overwrite the output file without asking
        #[arg(short, long)]
        force: bool,
        /// Suppress the progress bar
        #[arg(short, long)]
        quiet: bool,
    },
    /// Decrypt a file encrypted with the same key
    Decrypt {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Key on the command line (prompted for with echo off when omitted)
        #[arg(short, long)]
        key: Option<String>,
        /// Overwrite the output file without asking
        #[arg(short, long)]
        force: bool,
        /// Suppress the progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    match Cli::parse().command {
        // The transform is self-inverse, so both commands drive the same
        // engine; only the reported verb differs.
        Commands::Encrypt { input, output, key, force, quiet } => {
            run("Encrypted", &input, &output, key, force, quiet)
        }
        Commands::Decrypt { input, output, key, force, quiet } => {
            run("Decrypted", &input, &output, key, force, quiet)
        }
    }
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn run(
    verb:   &str,
    input:  &Path,
    output: &Path,
    key:    Option<String>,
    force:  bool,
    quiet:  bool,
) -> Result<(), Box<dyn Error>> {
    if !input.is_file() {
        return Err(format!("input file {} does not exist", input.display()).into());
    }
    if input == output {
        return Err("output file must differ from the input file".into());
    }
    if output.exists() && !force && !confirm_overwrite(output)? {
        println!("Operation cancelled.");
        return Ok(());
    }

    let key = read_key(key)?;
    let request = TransformRequest { input, output, key: &key };

    let processed = if quiet {
        transform(request, None)?
    } else {
        let mut bar = TerminalBar::new();
        let outcome = transform(request, Some(&mut |done, total| bar.update(done, total)));
        bar.finish();
        outcome?
    };

    println!("{verb} {processed} bytes: {} -> {}", input.display(), output.display());
    Ok(())
}

/// Ask before clobbering an existing output file. Anything not starting
/// with `y` cancels.
fn confirm_overwrite(path: &Path) -> io::Result<bool> {
    print!("File {} already exists. Overwrite? (y/n): ", path.display());
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().to_lowercase().starts_with('y'))
}

/// Take the key from the flag, or prompt for it with echo disabled.
fn read_key(flag: Option<String>) -> Result<Key, Box<dyn Error>> {
    let raw = match flag {
        Some(k) => k,
        None => rpassword::prompt_password(format!(
            "Encryption key (minimum {MIN_KEY_LENGTH} characters): "
        ))?,
    };
    Ok(Key::new(raw.into_bytes())?)
}
