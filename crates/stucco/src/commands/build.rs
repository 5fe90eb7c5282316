//! Build command - Resolve JSX macros in .jsx/.tsx files

use clap::{Args, ValueEnum};
use ignore::Walk;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use stucco_atelier_macros::{transform_jsx_macros, MacroOptions, RootEntry, RootKind};

use crate::config::StuccoConfig;

const JSX_EXTENSIONS: [&str; 2] = ["jsx", "tsx"];

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Output the transformed source followed by its global types
    #[default]
    Js,
    /// Output JSON with code, global types and per-root metadata
    Json,
    /// Only show statistics (no output)
    Stats,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Files or directories to transform (default: .)
    pub patterns: Vec<String>,

    /// Output directory (default: ./dist)
    #[arg(short, long, default_value = "./dist")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "js")]
    pub format: OutputFormat,

    /// Number of threads (default: number of CPUs)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Continue on errors
    #[arg(long)]
    pub continue_on_error: bool,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            output: PathBuf::from("./dist"),
            format: OutputFormat::default(),
            threads: None,
            continue_on_error: false,
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildOutput {
    filename: String,
    code: String,
    global_types: String,
    roots: Vec<RootSummary>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct RootSummary {
    /// `module` for macros outside any function
    kind: &'static str,
    start: u32,
    end: u32,
    models: Vec<String>,
    slots: Option<String>,
    expose: Option<String>,
    styles: Vec<StyleSummary>,
    define_component: bool,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct StyleSummary {
    start: u32,
    end: u32,
    lang: Option<String>,
    css_modules: bool,
}

impl From<&RootEntry> for RootSummary {
    fn from(entry: &RootEntry) -> Self {
        let (kind, start, end) = match &entry.root {
            Some(root) => (
                match root.kind {
                    RootKind::ArrowFunction => "arrowFunction",
                    RootKind::FunctionExpression => "functionExpression",
                    RootKind::FunctionDeclaration => "functionDeclaration",
                },
                root.span.start,
                root.span.end,
            ),
            None => ("module", 0, 0),
        };
        let macros = &entry.macros;
        Self {
            kind,
            start,
            end,
            models: macros.define_model.clone(),
            slots: macros.define_slots.clone(),
            expose: macros.define_expose.clone(),
            styles: macros
                .define_style
                .iter()
                .map(|style| StyleSummary {
                    start: style.span.start,
                    end: style.span.end,
                    lang: style.lang.as_ref().map(|lang| lang.to_string()),
                    css_modules: style.is_css_modules,
                })
                .collect(),
            define_component: macros.define_component,
        }
    }
}

pub fn run(args: BuildArgs, config: &StuccoConfig) {
    let start = Instant::now();

    if let Some(threads) = args.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            tracing::warn!("Failed to configure thread pool: {}", e);
        }
    }

    let patterns = if args.patterns.is_empty() {
        vec![".".to_string()]
    } else {
        args.patterns.clone()
    };
    let files = collect_files(&patterns);

    if files.is_empty() {
        eprintln!("No .jsx/.tsx files found matching the patterns");
        std::process::exit(1);
    }

    let success = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let options = &config.macros;

    let results: Vec<_> = files
        .par_iter()
        .map(|path| match transform_file(path, options) {
            Ok(output) => {
                success.fetch_add(1, Ordering::Relaxed);
                Some((path.clone(), output))
            }
            Err(e) => {
                failed.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error transforming {}: {}", path.display(), e);

                if !args.continue_on_error {
                    std::process::exit(1);
                }

                None
            }
        })
        .collect();

    if args.format != OutputFormat::Stats {
        if let Err(e) = fs::create_dir_all(&args.output) {
            eprintln!("Failed to create {}: {}", args.output.display(), e);
            std::process::exit(1);
        }

        for (path, output) in results.into_iter().flatten() {
            let out_path = args.output.join(output_file_name(&path, args.format));
            let content = match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(&output).unwrap_or_default(),
                _ => format!("{}{}", output.code, output.global_types),
            };

            if let Err(e) = fs::write(&out_path, content) {
                eprintln!("Failed to write {}: {}", out_path.display(), e);
            }
        }
    }

    let elapsed = start.elapsed();
    let success = success.load(Ordering::Relaxed);
    let failed = failed.load(Ordering::Relaxed);

    if failed > 0 {
        eprintln!(
            "✗ {} file(s) failed, {} transformed in {:.4}s",
            failed,
            success,
            elapsed.as_secs_f64()
        );
        std::process::exit(1);
    }

    let file_word = if success == 1 { "file" } else { "files" };
    eprintln!(
        "✓ {} {} transformed in {:.4}s",
        success,
        file_word,
        elapsed.as_secs_f64()
    );
}

fn transform_file(path: &Path, options: &MacroOptions) -> Result<BuildOutput, String> {
    let source = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    let filename = path.to_string_lossy().replace('\\', "/");

    let result = transform_jsx_macros(&source, &filename, options).map_err(|e| e.to_string())?;
    tracing::debug!(file = %filename, roots = result.root_map.len(), "transformed");

    Ok(BuildOutput {
        roots: result.root_map.iter().map(RootSummary::from).collect(),
        filename,
        code: result.code,
        global_types: result.global_types,
    })
}

fn collect_files(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            if is_jsx_file(path) {
                files.push(path.to_path_buf());
            } else {
                tracing::warn!("Skipping {}: not a .jsx/.tsx file", pattern);
            }
            continue;
        }

        for entry in Walk::new(path).flatten() {
            let path = entry.path();
            if is_jsx_file(path) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

fn is_jsx_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| JSX_EXTENSIONS.contains(&ext))
}

fn output_file_name(path: &Path, format: OutputFormat) -> PathBuf {
    let name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output.tsx"));
    match format {
        OutputFormat::Json => name.with_extension("json"),
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_jsx_file() {
        assert!(is_jsx_file(Path::new("src/App.tsx")));
        assert!(is_jsx_file(Path::new("Button.jsx")));
        assert!(!is_jsx_file(Path::new("index.ts")));
        assert!(!is_jsx_file(Path::new("Makefile")));
    }

    #[test]
    fn test_output_file_name() {
        let path = Path::new("src/components/App.tsx");
        assert_eq!(output_file_name(path, OutputFormat::Js), PathBuf::from("App.tsx"));
        assert_eq!(output_file_name(path, OutputFormat::Json), PathBuf::from("App.json"));
    }

    #[test]
    fn test_root_summary() {
        let result = transform_jsx_macros(
            "defineStyle.scss(`.a {}`)\nexport default defineComponent(() => {\n  defineSlots()\n  return null\n})",
            "App.tsx",
            &MacroOptions::default(),
        )
        .unwrap();
        let roots: Vec<RootSummary> = result.root_map.iter().map(RootSummary::from).collect();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].kind, "module");
        assert_eq!(roots[0].styles[0].lang.as_deref(), Some("scss"));
        assert_eq!(roots[1].kind, "arrowFunction");
        assert!(roots[1].define_component);
        assert_eq!(roots[1].slots.as_deref(), Some("Partial<typeof __MACROS_slots>"));

        let json = serde_json::to_value(&roots[1]).unwrap();
        assert_eq!(json["defineComponent"], true);
    }
}
