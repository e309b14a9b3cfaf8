// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use clap::Parser;
use std::fmt::Write as _;
use std::path::PathBuf;

use proxylog_import::{capture, config, filter_entries, parse_archive_with, ParsedEntry};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "proxylog-import")]
struct Args {
    /// Archive to import
    archive: PathBuf,

    /// Optional config TOML path
    #[arg(long)]
    config: Option<String>,

    /// Only list entries whose "method host path status" contains this text
    #[arg(long, default_value = "")]
    filter: String,

    /// Append imported entries to this JSONL file
    #[arg(long)]
    jsonl: Option<String>,

    /// Write raw request/response files into this directory
    #[arg(long)]
    dump_dir: Option<String>,

    /// Decode threads (overrides config)
    #[arg(long)]
    workers: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let cfg = load_config(args.config.as_deref()).await;
    let mut options = cfg.import_options();
    if let Some(w) = args.workers {
        options.workers = w;
    }

    let archive = args.archive.clone();
    let report =
        tokio::task::spawn_blocking(move || parse_archive_with(&archive, &options)).await??;

    info!(
        archive = %args.archive.display(),
        entries = report.entries.len(),
        skipped = report.skipped.len(),
        "archive imported"
    );
    for s in &report.skipped {
        warn!(member = %s.name, reason = %s.reason, "member skipped");
    }

    print!("{}", render_table(&filter_entries(&report.entries, &args.filter)));

    if let Some(path) = args.jsonl.or(cfg.export.captures) {
        let writer = capture::CaptureWriter::new(path.clone()).await?;
        writer.write_entries(&report.entries).await?;
        info!(%path, "entries exported");
    }
    if let Some(dir) = args.dump_dir.or(cfg.export.dump_dir) {
        let n = capture::dump_raw_messages(&report.entries, &dir).await?;
        info!(%dir, entries = n, "raw messages written");
    }

    Ok(())
}

async fn load_config(path: Option<&str>) -> config::Config {
    match path {
        Some(p) => config::Config::load_from_path(p).await.unwrap_or_else(|e| {
            warn!(%p, %e, "failed to load config, using defaults");
            config::Config::default()
        }),
        None => config::Config::default(),
    }
}

/// One row per entry; `#` is the 1-based position in the full import.
fn render_table(rows: &[(usize, &ParsedEntry)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5}  {:<7}  {:<32}  {:<6}  PATH", "#", "METHOD", "HOST", "STATUS");
    for (idx, e) in rows {
        let _ = writeln!(
            out,
            "{:>5}  {:<7}  {:<32}  {:<6}  {}",
            idx + 1,
            e.method(),
            e.host(),
            e.status_code_text(),
            e.path()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tokio::fs;
    use uuid::Uuid;

    #[test]
    fn args_parse_flags() {
        let args = Args::try_parse_from([
            "proxylog-import",
            "capture.proxymanlogv2",
            "--filter",
            "api",
            "--workers",
            "4",
            "--dump-dir",
            "raw",
        ])
        .expect("parse args");
        assert_eq!(args.archive, PathBuf::from("capture.proxymanlogv2"));
        assert_eq!(args.filter, "api");
        assert_eq!(args.workers, Some(4));
        assert_eq!(args.dump_dir.as_deref(), Some("raw"));
        assert!(args.jsonl.is_none());
    }

    #[test]
    fn args_require_archive() {
        assert!(Args::try_parse_from(["proxylog-import"]).is_err());
    }

    #[tokio::test]
    async fn main_cli_config_loads_toml() -> anyhow::Result<()> {
        let tmp = std::env::temp_dir().join(format!("proxylog_main_cfg_{}.toml", Uuid::new_v4()));
        fs::write(&tmp, "[general]\nworkers = 3\n").await?;
        let cfg = load_config(tmp.to_str()).await;
        assert_eq!(cfg.general.workers, 3);
        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn main_bad_config_uses_defaults() {
        let cfg = load_config(Some("/nonexistent/proxylog.toml")).await;
        assert_eq!(cfg.general.workers, 1);
        assert_eq!(cfg.general.member_prefix, "request_");
    }

    #[test]
    fn table_lists_rows_with_one_based_index() {
        let e = ParsedEntry::new(
            "api.test".into(),
            443,
            true,
            "GET".into(),
            "/v1".into(),
            Bytes::from_static(b"GET /v1 HTTP/1.1\r\n\r\n"),
            Bytes::from_static(b"HTTP/1.1 404 Not Found\r\n\r\n"),
        );
        let table = render_table(&[(2, &e)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("METHOD"));
        assert!(lines[1].trim_start().starts_with("3  GET"));
        assert!(lines[1].contains("404"));
        assert!(lines[1].ends_with("/v1"));
    }
}
