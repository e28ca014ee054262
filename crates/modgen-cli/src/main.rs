//! ModGen CLI.
//!
//! Reads a JSON mod declaration and drives the compiler: validate it, print
//! its manifest, or generate the platform project.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use modgen_compiler::generators::fabric::{GENERATOR_KEY, MISSING_ASSETS_FILE};
use modgen_compiler::{Declaration, Mod};

mod ui;

use ui::Ui;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "MODGEN_LOG";

#[derive(Parser)]
#[command(name = "modgen")]
#[command(about = "ModGen - compile declarative mod elements into buildable platform projects")]
#[command(version)]
struct Cli {
    /// Only print results and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered generators
    Generators,

    /// Validate a declaration without writing anything
    Check {
        /// Declaration file (JSON)
        declaration: PathBuf,
    },

    /// Print the manifest of a declaration
    Manifest {
        /// Declaration file (JSON)
        declaration: PathBuf,
    },

    /// Generate the platform project for a declaration
    Compile {
        /// Declaration file (JSON)
        declaration: PathBuf,

        /// Output directory; the project is created inside it
        #[arg(short, long, default_value = "build")]
        output: PathBuf,
    },
}

fn main() -> miette::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let ui = Ui::new(cli.quiet);

    modgen_compiler::init()?;

    match cli.command {
        Commands::Generators => {
            for key in modgen_compiler::list_generators() {
                println!("{key}");
            }
        }

        Commands::Check { declaration } => check(&ui, &declaration)?,

        Commands::Manifest { declaration } => {
            let mod_ = load(&declaration)?;
            let manifest = serde_json::to_string_pretty(&mod_.to_manifest())
                .map_err(modgen_compiler::ModError::from)?;
            println!("{manifest}");
        }

        Commands::Compile {
            declaration,
            output,
        } => compile(&ui, &declaration, &output)?,
    }

    Ok(())
}

/// Logs go to stderr so `manifest` output stays clean JSON.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load(path: &Path) -> miette::Result<Mod> {
    let declaration = Declaration::load(path)?;
    let mod_ = declaration.build(None)?;
    debug!(
        path = %path.display(),
        mod_id = mod_.mod_id(),
        elements = mod_.elements().len(),
        "loaded declaration"
    );
    Ok(mod_)
}

fn check(ui: &Ui, path: &Path) -> miette::Result<()> {
    let spinner = ui.spinner("Checking declaration...");
    let result = load(path);
    spinner.finish_and_clear();

    match result {
        Ok(mod_) => {
            ui.looking_good();
            summary(ui, &mod_);
            ui.info(&format!("Run `modgen compile {}` to generate it.", path.display()));
            Ok(())
        }
        Err(e) => {
            ui.nope_header();
            Err(e)
        }
    }
}

fn compile(ui: &Ui, path: &Path, output: &Path) -> miette::Result<()> {
    let start = Instant::now();
    let spinner = ui.spinner("Compiling mod...");

    let result = load(path).and_then(|mod_| {
        let root = mod_.compile(output)?;
        Ok((mod_, root))
    });
    spinner.finish_and_clear();

    let (mod_, root) = match result {
        Ok(compiled) => compiled,
        Err(e) => {
            ui.nope_header();
            return Err(e);
        }
    };

    ui.success(&format!("Generated {}", mod_.name()));
    summary(ui, &mod_);

    if mod_.generator_key() == GENERATOR_KEY {
        let missing = root
            .join("src/main/resources/assets")
            .join(mod_.mod_id())
            .join(MISSING_ASSETS_FILE);
        if missing.is_file() {
            ui.warn(&format!("Some textures are missing, see {}", missing.display()));
        }
    }

    let elapsed_ms = start.elapsed().as_millis();
    info!(root = %root.display(), elapsed_ms, "compile finished");
    ui.timing("Done", elapsed_ms);
    if !ui.is_quiet() {
        println!();
        ui.box_header(&format!("{} What's Next", ui::symbols::ARROW));
        ui.box_line("");
        ui.box_line(&format!("   cd {} && ./gradlew build", root.display()));
        ui.box_line("");
        ui.box_footer();
    }

    println!("{}", root.display());
    Ok(())
}

/// Element counts per kind, plus identity.
fn summary(ui: &Ui, mod_: &Mod) {
    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for element in mod_.elements() {
        *kinds.entry(element.kind()).or_default() += 1;
    }

    ui.blank();
    ui.box_header(&format!("{} {}", mod_.mod_id(), mod_.version()));
    ui.box_line("");
    ui.row("generator", mod_.generator_key());
    for (kind, n) in &kinds {
        ui.row(kind, &ui::count(*n, "element"));
    }
    let startup = mod_.startup_actions().len();
    if startup > 0 {
        ui.row("startup", &ui::count(startup, "command"));
    }
    ui.box_line("");
    ui.box_footer();
    ui.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_demo_declaration() {
        modgen_compiler::init().unwrap();
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/ruby_mod.json");
        let mod_ = load(&path).unwrap();
        assert_eq!(mod_.mod_id(), "examplemod");
        assert_eq!(mod_.elements().len(), 10);
    }

    #[test]
    fn test_load_missing_file_fails() {
        modgen_compiler::init().unwrap();
        assert!(load(Path::new("no/such/declaration.json")).is_err());
    }
}
