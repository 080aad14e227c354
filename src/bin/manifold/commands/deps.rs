//! `manifold deps` command

use anyhow::Result;

use crate::cli::DepsArgs;
use crate::commands::Session;
use manifold::ops::resolve::resource_deps;

pub fn execute(args: DepsArgs, session: &Session) -> Result<()> {
    let ws = session.workspace()?;
    let policy = ws.config().passthrough_policy();

    let found = match resource_deps(ws.rules(), &policy, &args.target) {
        Ok(found) => found,
        Err(e) => session.fail(&ws, &e),
    };

    for node in found {
        match node.manifest_fragment() {
            Some(manifest) => println!("{} ({})", node.target(), manifest),
            None => println!("{}", node.target()),
        }
    }

    Ok(())
}
