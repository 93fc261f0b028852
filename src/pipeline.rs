//! The apply pipeline.
//!
//! One linear pass per invocation: filter the configuration lines, push
//! them in configuration mode, then branch on dry-run versus
//! commit/save. The session is closed exactly once on every path, and a
//! close failure never overrides the primary result.

use log::debug;

use crate::error::Error;
use crate::report::Report;
use crate::request::ApplyRequest;
use crate::session::ConfigSession;

/// What a successful pass did.
struct Outcome {
    applied: bool,
    committed: bool,
    saved: bool,
    dry_run: bool,
}

/// Run the pipeline over an open session and always tear it down.
pub async fn execute<S: ConfigSession>(request: &ApplyRequest, session: S) -> Report {
    let mut session = session;
    let mut logs = Vec::new();

    let result = apply(request, &mut session, &mut logs).await;

    // Best-effort teardown; never changes the reported outcome.
    if let Err(e) = session.close().await {
        debug!("session close failed: {}", e);
    }

    match result {
        Ok(outcome) => Report::success(
            outcome.applied,
            outcome.committed,
            outcome.saved,
            outcome.dry_run,
            logs,
        ),
        // No session output exists before any line was pushed.
        Err(err @ Error::NoOperations) => Report::failure(&err),
        Err(err) => Report::failure_with_logs(&err, logs),
    }
}

async fn apply<S: ConfigSession>(
    request: &ApplyRequest,
    session: &mut S,
    logs: &mut Vec<String>,
) -> Result<Outcome, Error> {
    let lines = request.operations();
    if lines.is_empty() {
        return Err(Error::NoOperations);
    }

    session.enter_config_mode().await.map_err(Error::Apply)?;

    let output = session
        .send_config_batch(&lines)
        .await
        .map_err(Error::Apply)?;
    if !output.is_empty() {
        logs.push(output);
    }

    if request.dry_run {
        let diff = session.diff().await.map_err(Error::Apply)?;
        if !diff.is_empty() {
            logs.push(diff);
        }
        session.discard().await.map_err(Error::Apply)?;
        session.exit_config_mode().await.map_err(Error::Apply)?;

        return Ok(Outcome {
            applied: false,
            committed: false,
            saved: false,
            dry_run: true,
        });
    }

    if request.commit {
        let output = session.commit().await.map_err(Error::Apply)?;
        if !output.is_empty() {
            logs.push(output);
        }
    }

    if request.save {
        let output = session.save().await.map_err(Error::Apply)?;
        if !output.is_empty() {
            logs.push(output);
        }
    }

    session.exit_config_mode().await.map_err(Error::Apply)?;

    Ok(Outcome {
        applied: true,
        committed: request.commit,
        saved: request.save,
        dry_run: false,
    })
}
