//! `manifold resolve` command

use anyhow::{Context, Result};

use crate::cli::ResolveArgs;
use crate::commands::Session;
use manifold::ops::resolve::{resolve_all, resolve_target, write_artifacts};

pub fn execute(args: ResolveArgs, session: &Session) -> Result<()> {
    let ws = session.workspace()?;
    let description = ws.manifest_description();

    let results = if args.all {
        resolve_all(ws.rules(), &description)
    } else {
        args.targets
            .iter()
            .map(|t| (t.clone(), resolve_target(ws.rules(), &description, t)))
            .collect()
    };

    // All or nothing: stop at the first failure before printing anything
    let mut artifacts = Vec::with_capacity(results.len());
    for (_, result) in results {
        match result {
            Ok(artifact) => artifacts.push(artifact),
            Err(e) => session.fail(&ws, &e),
        }
    }

    let gen_dir = ws.gen_dir();

    if let Some(out_dir) = args.out_dir.or_else(|| ws.out_dir()) {
        let summary = write_artifacts(&artifacts, &out_dir, &gen_dir)?;
        tracing::info!(
            "wrote {} definition(s), {} up to date",
            summary.written.len(),
            summary.unchanged.len()
        );

        // With --json, stdout carries the definitions instead of the paths
        if !args.json {
            for path in &summary.written {
                println!("{}", path.display());
            }
            return Ok(());
        }
    }

    if args.json {
        let records: Vec<_> = artifacts.iter().map(|a| a.to_record(&gen_dir)).collect();
        let json =
            serde_json::to_string_pretty(&records).context("failed to serialize definitions")?;
        println!("{}", json);
        return Ok(());
    }

    for artifact in &artifacts {
        println!("{}", artifact.target());
        println!("  skeleton: {}", artifact.skeleton());
        for fragment in artifact.manifests().iter() {
            println!("  {}", fragment);
        }
    }

    Ok(())
}
