use std::io::{self, IsTerminal};

use anyhow::Context;

use hbnb_console::{ConsoleConfig, Interpreter, Startup, repl, startup};
use hbnb_core::models;
use hbnb_infra::{FileSnapshotStore, Storage};

fn main() -> anyhow::Result<()> {
    hbnb_observability::init();

    let config = ConsoleConfig::from_env();
    let registry = models::registry();
    let mut storage = Storage::new(FileSnapshotStore::new(&config.storage.snapshot_path));

    let loaded = startup::load(&mut storage, &registry).with_context(|| {
        format!(
            "failed to load snapshot {}",
            config.storage.snapshot_path.display()
        )
    })?;
    if let Startup::Quarantined { reason, moved_to } = &loaded {
        eprintln!(
            "warning: {reason}; moved to {}; starting with an empty store",
            moved_to.as_deref().unwrap_or("(nowhere)")
        );
    }

    let mut interpreter = Interpreter::new(storage, registry, io::stdout().lock());
    let stdin = io::stdin();
    if stdin.is_terminal() {
        repl::run_interactive(&mut interpreter, &config.prompt)
            .context("interactive session failed")?;
    } else {
        repl::run_script(&mut interpreter, stdin.lock())
            .context("reading commands from stdin failed")?;
    }
    Ok(())
}
