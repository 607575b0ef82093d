//! File watcher: scans on startup, then re-scans on source changes.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use doccomment::error::Error;

use crate::commands;
use crate::diagnostics;
use crate::report::Format;

/// Debounce delay between filesystem events and re-scan.
const DEBOUNCE_MS: u64 = 100;

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns `Error::WatchFailed` if the watcher cannot be created.
fn create_watcher(tx: crossbeam_channel::Sender<()>) -> Result<notify::RecommendedWatcher, Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_) | notify::EventKind::Modify(_) | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return Error::WatchFailed {
            reason: format!("watcher setup failed: {e}"),
        };
    });
}

/// Entry point for the watch command.
///
/// Runs an initial scan, then watches `root` recursively and re-scans on changes.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if `root` does not exist, or
/// `Error::WatchFailed` if the watcher cannot be set up.
pub fn run(root: &Path, format: Format) -> Result<ExitCode, Error> {
    if !root.exists() {
        return Err(Error::FileNotFound {
            path: root.to_path_buf(),
        });
    }

    tracing::info!("initial scan");
    let mut last_code = run_scan(root, format);

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;
    watcher.watch(root, RecursiveMode::Recursive).map_err(|e| {
        return Error::WatchFailed {
            reason: format!("cannot watch {}: {e}", root.display()),
        };
    })?;

    eprintln!("watch: monitoring {}, press Ctrl+C to stop", root.display());

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        tracing::info!("change detected, re-scanning");
        last_code = run_scan(root, format);
    }

    return Ok(last_code);
}

/// Run scan once and print the result. Returns the exit code from scan.
fn run_scan(root: &Path, format: Format) -> ExitCode {
    return match commands::scan(root, format) {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(3_u8)
        },
    };
}
