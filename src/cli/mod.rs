use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use marketlint::Config;

mod all;
mod frontmatter;
mod manifest;
mod structure;

#[derive(Parser)]
#[command(
    name = "marketlint",
    version,
    about = "Static validation suite for Claude plugin marketplaces"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file [default: marketlint.toml if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show project information
    #[arg(long)]
    about: bool,
}

#[derive(Subcommand)]
#[command(next_display_order = None)]
enum Commands {
    /// Check directory layout and naming conventions
    Structure {
        /// Marketplace root directory
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },
    /// Validate marketplace.json and plugin.json against their schemas
    Manifest {
        /// Validate .claude-plugin/marketplace.json
        #[arg(long)]
        marketplace: bool,
        /// Validate plugins/*/.claude-plugin/plugin.json
        #[arg(long)]
        plugins: bool,
        /// Validate both (default when neither --marketplace nor --plugins is given)
        #[arg(long)]
        all: bool,
        /// Exit with an error if any file fails validation
        #[arg(long)]
        strict: bool,
        /// Marketplace root directory
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
        /// Marketplace schema [default: schemas/marketplace-schema.json]
        #[arg(long)]
        marketplace_schema: Option<PathBuf>,
        /// Plugin schema [default: schemas/plugin-schema.json]
        #[arg(long)]
        plugin_schema: Option<PathBuf>,
    },
    /// Validate YAML frontmatter in plugins/*/SKILL.md
    Frontmatter {
        /// Directory containing plugin folders
        #[arg(long, default_value = "plugins")]
        plugins_dir: PathBuf,
        /// Frontmatter schema [default: schemas/skill-frontmatter-schema.json]
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Exit with an error if any file fails validation
        #[arg(long)]
        strict: bool,
    },
    /// Run every check and summarize
    All {
        /// Forward --strict to every check
        #[arg(long)]
        strict: bool,
        /// Show full output of passing checks too
        #[arg(long)]
        verbose: bool,
    },
}

/// Entry point for the binary: returns the process exit status.
pub fn run(cli: Cli) -> i32 {
    if cli.about {
        print_about();
        return 0;
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("marketlint: {e}");
            return 1;
        }
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    execute(cli.command, &config, &mut stdout.lock(), &mut stderr.lock())
}

/// Run one command against the given sinks.
///
/// Shared by the binary entry point and the `all` orchestrator, which points
/// the sinks at capture buffers.
fn execute(
    command: Option<Commands>,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    match command {
        Some(Commands::Structure { base_dir, strict }) => {
            structure::run(&base_dir, strict, config, out, err)
        }
        Some(Commands::Manifest {
            marketplace,
            plugins,
            all,
            strict,
            base_dir,
            marketplace_schema,
            plugin_schema,
        }) => {
            let options = manifest::Options {
                marketplace: marketplace || all || !plugins,
                plugins: plugins || all || !marketplace,
                strict,
                base_dir,
                marketplace_schema: marketplace_schema
                    .unwrap_or_else(|| config.schemas.marketplace.clone()),
                plugin_schema: plugin_schema.unwrap_or_else(|| config.schemas.plugin.clone()),
            };
            manifest::run(&options, out, err)
        }
        Some(Commands::Frontmatter {
            plugins_dir,
            schema,
            strict,
        }) => {
            let schema = schema.unwrap_or_else(|| config.schemas.frontmatter.clone());
            frontmatter::run(&plugins_dir, &schema, strict, out, err)
        }
        Some(Commands::All { strict, verbose }) => all::run(strict, verbose, config, out, err),
        None => fail(
            err,
            "Usage: marketlint <command> [args]\nRun `marketlint --help` for details.",
        ),
    }
}

/// Write one line to the error sink.
///
/// This is the only place a failed write to `err` is dropped.
fn emit(err: &mut dyn Write, message: impl fmt::Display) {
    let _ = writeln!(err, "{message}");
}

/// Report a fatal condition and return failure.
fn fail(err: &mut dyn Write, message: impl fmt::Display) -> i32 {
    emit(err, message);
    1
}

/// Report a failed write to the output sink and return failure.
fn output_error(err: &mut dyn Write, e: &io::Error) -> i32 {
    fail(err, format_args!("marketlint: cannot write output: {e}"))
}

fn print_about() {
    println!(
        "marketlint: Claude Marketplace Static Validation Suite\n\
         ├─ version:    {}\n\
         ├─ author:     {}\n\
         ├─ source:     {}\n\
         └─ licence:    {} https://www.apache.org/licenses/LICENSE-2.0",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS"),
        env!("CARGO_PKG_REPOSITORY"),
        env!("CARGO_PKG_LICENSE"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn manifest_defaults_to_all() {
        let cli = Cli::try_parse_from(["marketlint", "manifest"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Manifest {
                marketplace: false,
                plugins: false,
                all: false,
                ..
            })
        ));
    }

    #[test]
    fn frontmatter_default_plugins_dir() {
        let cli = Cli::try_parse_from(["marketlint", "frontmatter", "--strict"]).unwrap();
        match cli.command {
            Some(Commands::Frontmatter {
                plugins_dir,
                schema,
                strict,
            }) => {
                assert_eq!(plugins_dir, PathBuf::from("plugins"));
                assert!(schema.is_none());
                assert!(strict);
            }
            _ => panic!("expected frontmatter command"),
        }
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn fail_writes_one_line_and_returns_failure() {
        let mut err = Vec::new();
        assert_eq!(fail(&mut err, format_args!("Error: {} missing", "schema")), 1);
        assert_eq!(String::from_utf8(err).unwrap(), "Error: schema missing\n");
    }

    #[test]
    fn fail_tolerates_closed_error_sink() {
        assert_eq!(fail(&mut ClosedSink, "boom"), 1);
        let e = io::Error::from(io::ErrorKind::BrokenPipe);
        assert_eq!(output_error(&mut ClosedSink, &e), 1);
    }

    #[test]
    fn no_command_is_usage_error() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = execute(None, &Config::default(), &mut out, &mut err);
        assert_eq!(code, 1);
        assert!(String::from_utf8(err).unwrap().contains("Usage"));
    }
}
