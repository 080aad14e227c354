//! `manifold check` command

use anyhow::{bail, Result};

use crate::commands::Session;
use manifold::ops::check;

pub fn execute(session: &Session) -> Result<()> {
    let ws = session.workspace()?;

    let report = match check(ws.rules(), &ws.manifest_description()) {
        Ok(report) => report,
        Err(e) => session.fail(&ws, &e),
    };

    if !report.is_ok() {
        for (_, err) in &report.failures {
            session.report(&ws, err);
        }
        bail!(
            "{} of {} manifest target(s) failed to resolve",
            report.failures.len(),
            report.failures.len() + report.resolved.len()
        );
    }

    println!(
        "ok: {} rule(s), {} manifest target(s) resolved",
        report.rules,
        report.resolved.len()
    );

    Ok(())
}
