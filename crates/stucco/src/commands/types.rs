//! Types command - Print global type declarations

use clap::Args;
use std::fs;
use std::path::PathBuf;
use stucco_atelier_macros::{alias_declarations, transform_jsx_macros};

use crate::config::StuccoConfig;

#[derive(Args)]
pub struct TypesArgs {
    /// Print the declarations a specific file needs instead of the full set
    pub file: Option<PathBuf>,
}

pub fn run(args: TypesArgs, config: &StuccoConfig) {
    let Some(file) = args.file else {
        print!("{}", alias_declarations(&config.macros));
        return;
    };

    let source = match fs::read_to_string(&file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read {}: {}", file.display(), e);
            std::process::exit(1);
        }
    };
    match transform_jsx_macros(&source, &file.to_string_lossy(), &config.macros) {
        Ok(result) => print!("{}", result.global_types),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
