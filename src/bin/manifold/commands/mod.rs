//! Command implementations

pub mod check;
pub mod completions;
pub mod deps;
pub mod rdeps;
pub mod resolve;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::Cli;
use manifold::core::Workspace;
use manifold::resolver::ResolveError;
use manifold::util::diagnostic::{emit, suggestions};
use manifold::util::GlobalContext;

/// Settings shared by every command.
pub struct Session {
    ctx: GlobalContext,
    rules: Option<PathBuf>,
}

impl Session {
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut ctx = GlobalContext::new().context("failed to create global context")?;
        ctx.set_verbose(cli.verbose);
        ctx.set_color(!cli.no_color);

        Ok(Session {
            ctx,
            rules: cli.rules.clone(),
        })
    }

    /// Load the workspace from `--rules` or the nearest Rules.toml.
    pub fn workspace(&self) -> Result<Workspace> {
        let rules_path = match &self.rules {
            Some(path) => self.ctx.cwd().join(path),
            None => self
                .ctx
                .find_rules_file()
                .map_err(|e| anyhow::anyhow!("{}\n{}", e, suggestions::NO_RULES_FILE))?,
        };

        tracing::debug!("using rules file {}", rules_path.display());
        Workspace::new(&rules_path, &self.ctx)
    }

    /// Print a resolution error with its suggestions, pointing at the rules file.
    pub fn report(&self, ws: &Workspace, err: &ResolveError) {
        let diagnostic = err.to_diagnostic().with_location(ws.rules().path());
        emit(&diagnostic, self.ctx.color());
    }

    /// Report a resolution error and exit.
    pub fn fail(&self, ws: &Workspace, err: &ResolveError) -> ! {
        self.report(ws, err);
        std::process::exit(1);
    }
}
