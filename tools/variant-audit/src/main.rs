use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use audit_service::render::{render_json, render_markdown, render_text};
use audit_service::{AuditConfig, AuditError, AuditService};

fn print_usage() {
    eprintln!(
        "Usage:\n\
         variant-audit --url URL [--ignore CHARS] [--file PATH] [--format text|markdown|json]\n\
         \x20             [--workers N] [--timeout SECS] [--forward-dict URL] [--reverse-dict URL] [--keep-single]\n\
         \n\
         URL is a book (ends with /zh or contains &res=) or a chapter (contains chapter=).\n\
         Notes: report goes to stdout unless --file is given; RUST_LOG controls diagnostics\n"
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Markdown,
    Json,
}

struct Options {
    url: String,
    file: Option<String>,
    format: Format,
    cfg: AuditConfig,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut url: Option<String> = None;
    let mut file: Option<String> = None;
    let mut format = Format::Text;
    let mut cfg = AuditConfig::default();

    let mut i = 0;
    while i < args.len() {
        let value = |name: &str| -> Result<String, String> {
            args.get(i + 1).cloned().ok_or_else(|| format!("{name} requires value"))
        };
        match args[i].as_str() {
            "--url" => { url = Some(value("--url")?); i += 2; }
            "--ignore" => { cfg.ignore = value("--ignore")?; i += 2; }
            "--file" => { file = Some(value("--file")?); i += 2; }
            "--format" => {
                format = match value("--format")?.as_str() {
                    "text" => Format::Text,
                    "markdown" | "md" => Format::Markdown,
                    "json" => Format::Json,
                    other => return Err(format!("unknown format `{other}`")),
                };
                i += 2;
            }
            "--workers" => {
                cfg.max_workers = value("--workers")?.parse().map_err(|_| "--workers requires number".to_string())?;
                i += 2;
            }
            "--timeout" => {
                let secs: u64 = value("--timeout")?.parse().map_err(|_| "--timeout requires seconds".to_string())?;
                cfg.fetch.timeout = Duration::from_secs(secs);
                i += 2;
            }
            "--forward-dict" => { cfg.dictionary.forward_url = value("--forward-dict")?; i += 2; }
            "--reverse-dict" => { cfg.dictionary.reverse_url = value("--reverse-dict")?; i += 2; }
            "--keep-single" => { cfg.dictionary.keep_single_variant = true; i += 1; }
            other => return Err(format!("unknown argument `{other}`")),
        }
    }

    let url = url.ok_or_else(|| "--url is required".to_string())?;
    Ok(Options { url, file, format, cfg })
}

fn ensure_parent_dir(path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn describe(err: AuditError) -> String {
    match err {
        AuditError::InvalidInput(e) => e.to_string(),
        other => format!("Error: {other}"),
    }
}

fn run(opts: Options) -> Result<(), String> {
    let svc = AuditService::new(opts.cfg).map_err(describe)?;
    let progress = |msg: &str| eprintln!("{msg}");
    let outcome = svc.audit(&opts.url, &progress, None).map_err(describe)?;

    let rendered = match opts.format {
        Format::Text => render_text(&outcome.report),
        Format::Markdown => render_markdown(&outcome.report),
        Format::Json => render_json(&outcome).map_err(|e| format!("Error: json encoding failed: {e}"))?,
    };

    for s in &outcome.skipped {
        eprintln!("warning: chapter {} skipped ({})", s.chapter, s.error);
    }

    match opts.file {
        Some(path) => {
            ensure_parent_dir(&path)
                .and_then(|_| fs::write(&path, rendered))
                .map_err(|e| format!("Error: cannot write {path}: {e}"))?;
            log::info!("report written to {path}");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return ExitCode::SUCCESS;
    }
    let opts = match parse_args(&args) {
        Ok(o) => o,
        Err(err) => {
            eprintln!("Error: {err}");
            print_usage();
            return ExitCode::from(2);
        }
    };
    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}
