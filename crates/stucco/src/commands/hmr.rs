//! HMR command - Inject HMR or SSR registration into a compiled module

use clap::Args;
use std::fs;
use std::path::PathBuf;
use stucco_atelier_hmr::{HmrInjector, HmrOptions};

use crate::config::StuccoConfig;

#[derive(Args)]
pub struct HmrArgs {
    /// Compiled module to inject into
    pub file: PathBuf,

    /// Module id used for record ids (default: the file path)
    #[arg(long)]
    pub id: Option<String>,

    /// Emit SSR registration instead of HMR records
    #[arg(long)]
    pub ssr: bool,

    /// Project root for SSR module ids
    #[arg(long)]
    pub root: Option<String>,

    /// Print the registered components as JSON instead of the code
    #[arg(long)]
    pub components: bool,
}

pub fn run(args: HmrArgs, config: &StuccoConfig) {
    let mut code = match fs::read_to_string(&args.file) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args.file.display(), e);
            std::process::exit(1);
        }
    };
    let module_id = args
        .id
        .clone()
        .unwrap_or_else(|| args.file.to_string_lossy().replace('\\', "/"));

    let injector = HmrInjector::new(merge_options(&config.hmr, &args));
    match injector.inject(&mut code, &module_id) {
        Ok(components) => {
            if components.is_empty() {
                tracing::warn!("No hot components found in {}", module_id);
            }
            if args.components {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&components).unwrap_or_default()
                );
            } else {
                println!("{}", code);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Command-line flags take precedence over the config file.
fn merge_options(base: &HmrOptions, args: &HmrArgs) -> HmrOptions {
    HmrOptions {
        ssr: base.ssr || args.ssr,
        root: args.root.clone().or_else(|| base.root.clone()),
        define_component_names: base.define_component_names.clone(),
    }
}
