use std::path::Path;

use {
    anyhow::Result,
    clap::Subcommand,
    larkwire_config::validate::{self, Diagnostic, Severity, ValidationResult},
    larkwire_feishu::validate_feishu,
};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors/warnings.
    Check {
        /// Show informational diagnostics in addition to errors and warnings.
        #[arg(long)]
        verbose: bool,
    },
    /// Print the path of the config file that would be loaded.
    Path,
}

pub fn handle_config(action: ConfigAction, config_dir: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Check { verbose } => check(config_dir, verbose),
        ConfigAction::Path => {
            match larkwire_config::find_config_file(config_dir) {
                Some(path) => println!("{}", path.display()),
                None => eprintln!("No config file found."),
            }
            Ok(())
        },
    }
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Syntax check plus every channel's own diagnostics.
fn run_checks(config_dir: Option<&Path>) -> ValidationResult {
    let mut result = validate::validate(config_dir);
    if let Some(config) = &result.config {
        let channel_diags = validate_feishu(config);
        result.extend(channel_diags);
    }
    result
}

fn format_diagnostic(d: &Diagnostic) -> String {
    let color = match d.severity {
        Severity::Error => RED,
        Severity::Warning => YELLOW,
        Severity::Info => CYAN,
    };
    if d.path.is_empty() {
        format!("  {BOLD}{color}{}{RESET} {}", d.severity, d.message)
    } else {
        format!("  {BOLD}{color}{}{RESET} {}: {}", d.severity, d.path, d.message)
    }
}

fn check(config_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let result = run_checks(config_dir);

    if let Some(ref path) = result.config_path {
        eprintln!("Checking {}\n", path.display());
    } else {
        eprintln!("No config file found; checking defaults.\n");
    }

    let mut shown = 0;
    for d in &result.diagnostics {
        if d.severity == Severity::Info && !verbose {
            continue;
        }
        eprintln!("{}", format_diagnostic(d));
        shown += 1;
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);

    if shown > 0 {
        eprintln!();
    }

    if errors == 0 && warnings == 0 {
        eprintln!("No issues found.");
    } else {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }

    if errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}
