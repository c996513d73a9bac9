use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use anyhow::{Context, Result};
use clap::Parser;
use photofit_core::{
    notify_failure, ArtifactStore, CancelToken, CompressionRequest, CompressionResult, Compressor,
    ImageRef, Notifier,
};

mod args;

use args::Args;

/// Prints failure notices to stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, title: &str, description: &str) {
        eprintln!("{}: {}", title, description);
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = args.resolve_options()?;
    let output = args.output_path();
    let request = CompressionRequest::new(ImageRef::from_path(&args.input), options)
        .context("Invalid compression options")?;

    // Keep the temp artifact next to the output so persisting is a rename
    let store_dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    let compressor = Compressor::new().with_store(ArtifactStore::temp_dir(store_dir));

    let runtime = build_runtime()?;
    let cancel = CancelToken::new();
    let watcher = watch_interrupt(&runtime, cancel.clone());

    let original_size = request.source().byte_len();
    let start = Instant::now();
    let result = runtime.block_on(compressor.compress_async(request, &cancel));
    let elapsed = start.elapsed();
    watcher.abort();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.summary())?);
    }

    if !result.is_ok() {
        notify_failure(&result, &StderrNotifier);
        return Ok(ExitCode::FAILURE);
    }

    if !args.json {
        print_summary(&result, original_size, elapsed);
    }

    if let Some(artifact) = result.into_artifact() {
        artifact
            .persist(&output)
            .with_context(|| format!("Failed to save {}", output.display()))?;
        if !args.json {
            println!("Saved to {}", output.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Single-threaded runtime with the signal driver enabled; encode steps run
/// on its blocking pool.
fn build_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")
}

/// Cancel `cancel` on the first Ctrl-C.
fn watch_interrupt(runtime: &Runtime, cancel: CancelToken) -> JoinHandle<()> {
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupted, finishing current step");
            cancel.cancel();
        }
    })
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn print_summary(result: &CompressionResult, original_size: Option<u64>, elapsed: std::time::Duration) {
    if let CompressionResult::Ok {
        final_quality,
        size_bytes,
        width,
        height,
        attempts,
        ..
    } = result
    {
        if let Some(original) = original_size {
            println!("Original size: {:.2} MB", original as f64 / 1_000_000.0);
        }
        println!(
            "New size:      {:.2} MB ({}x{}, quality {}, {} attempt(s), {:.2?})",
            *size_bytes as f64 / 1_000_000.0,
            width,
            height,
            final_quality,
            attempts,
            elapsed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_watcher_runs_on_cli_runtime() {
        let runtime = build_runtime().unwrap();
        let cancel = CancelToken::new();
        let watcher = watch_interrupt(&runtime, cancel.clone());

        runtime.block_on(async {
            // Let the watcher register its signal listener
            tokio::task::yield_now().await;
            assert!(!watcher.is_finished());
            watcher.abort();
            let err = watcher.await.unwrap_err();
            assert!(err.is_cancelled());
        });
        assert!(!cancel.is_cancelled());
    }
}
