use crate::{
    catalog::{Catalog, RestCatalog},
    config::Config,
    filter,
    job::SweepJob,
    notify::{self, SmtpNotifier},
    util::{ensure_dir, now_rfc3339, sha256_hex},
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "stock-sweep")]
#[command(about = "Out-of-stock deactivation job for shop catalogs (scan + deactivate + report + notify)")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./stock-sweep.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Doctor {},
    Preview {},
    Run {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg_path = resolve_config_path(args.config.as_deref())?;
    let cfg = Config::load(&cfg_path)?;

    match &args.cmd {
        Command::Doctor {} => {
            let log_path = resolve_log_path(&cfg, None);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            doctor(&cfg)
        }
        Command::Preview {} => {
            let log_path = resolve_log_path(&cfg, None);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            preview(&cfg)
        }
        Command::Run { out_dir } => run(&args, &cfg, out_dir.as_deref()),
    }
}

fn resolve_config_path(user: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = user {
        return Ok(p.to_path_buf());
    }
    let default = PathBuf::from("stock-sweep.toml");
    if default.exists() {
        Ok(default)
    } else {
        Ok(PathBuf::from("stock-sweep.example.toml"))
    }
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn doctor(cfg: &Config) -> Result<()> {
    let catalog = RestCatalog::new(&cfg.shop)?;
    let shop = match catalog.ping() {
        Ok(version) => serde_json::json!({"ok": true, "version": version}),
        Err(err) => serde_json::json!({"ok": false, "error": err.to_string()}),
    };

    let mail = if cfg.job.send_notification {
        match SmtpNotifier::new(&cfg.mail).and_then(|n| n.verify()) {
            Ok(()) => serde_json::json!({"ok": true}),
            Err(err) => serde_json::json!({"ok": false, "error": err.to_string()}),
        }
    } else {
        serde_json::json!({"ok": true, "skipped": "send_notification is off"})
    };

    let healthy =
        shop["ok"].as_bool().unwrap_or(false) && mail["ok"].as_bool().unwrap_or(false);
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "shop": shop,
            "mail": mail,
        }))?
    );
    if !healthy {
        return Err(anyhow!("doctor found problems"));
    }
    Ok(())
}

fn preview(cfg: &Config) -> Result<()> {
    let catalog = RestCatalog::new(&cfg.shop)?;
    let filter = filter::selection(&cfg.job);
    let variants = catalog.list_variants(&filter, 0, cfg.catalog.page_size)?;
    let recipient = if cfg.job.send_notification {
        Some(notify::resolve_recipient(
            &cfg.job.notify_email,
            &cfg.mail.system_address,
        ))
    } else {
        None
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "filter": filter,
            "matches": variants.len(),
            "recipient": recipient,
            "variants": variants,
        }))?
    );
    Ok(())
}

fn run(args: &Args, cfg: &Config, out_override: Option<&Path>) -> Result<()> {
    let cfg_norm = cfg.normalized_for_hash();
    let cfg_hash = sha256_hex(cfg_norm.as_bytes());
    let started = now_rfc3339();
    let run_id = sha256_hex(format!("{}:{}", cfg_hash, started).as_bytes());

    let out_root = out_override
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.output.out_dir));
    let run_dir = out_root.join(&run_id);

    ensure_dir(&run_dir)?;
    ensure_dir(&run_dir.join("logs"))?;

    let log_path = resolve_log_path(cfg, Some(&run_dir));
    let _guard = init_logging(args, cfg, log_path.as_deref())?;

    info!("run_id={run_id} out={}", run_dir.display());

    let catalog = RestCatalog::new(&cfg.shop)?;
    let notifier = SmtpNotifier::new(&cfg.mail)?;
    let job = SweepJob::new(cfg, catalog, notifier);
    let output = job.run()?;

    if cfg.output.write_report_json {
        std::fs::write(
            run_dir.join(&cfg.output.report_filename),
            serde_json::to_string_pretty(&output.report)?,
        )?;
    }

    if cfg.output.write_index_json {
        let index = serde_json::json!({
            "run_id": run_id,
            "started": started,
            "finished": now_rfc3339(),
            "deactivated_variants": output.report.deactivated_variants,
            "deactivated_articles": output.report.deactivated_articles,
            "notified": output.notified,
            "report": cfg.output.report_filename,
            "status": "ok",
        });
        std::fs::write(run_dir.join("index.json"), serde_json::to_string_pretty(&index)?)?;
    }

    if cfg.output.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "run_id": run_id,
                "run_dir": run_dir,
                "deactivated_variants": output.report.deactivated_variants,
                "deactivated_articles": output.report.deactivated_articles,
                "notified": output.notified,
                "status": "ok"
            }))?
        );
    }

    Ok(())
}

fn resolve_log_path(cfg: &Config, run_dir: Option<&Path>) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    if let Some(run_dir) = run_dir {
        return Some(run_dir.join("logs").join("stock-sweep.log"));
    }

    Some(PathBuf::from(&cfg.output.out_dir).join("stock-sweep.log"))
}
