//! `manifold rdeps` command

use anyhow::Result;

use crate::cli::RdepsArgs;
use crate::commands::Session;
use manifold::resolver::{ConfigurationError, ResolveError};

pub fn execute(args: RdepsArgs, session: &Session) -> Result<()> {
    let ws = session.workspace()?;
    let graph = ws.rules().graph();

    if !graph.contains(&args.target) {
        let err = ResolveError::from(ConfigurationError::UnknownTarget {
            target: args.target.clone(),
        });
        session.fail(&ws, &err);
    }

    for dependent in graph.dependents(&args.target) {
        println!("{}", dependent);
    }

    Ok(())
}
