//! ERD Builder
//!
//! Model relational schemas and derive MySQL DDL from the command line.
//! See `erd-builder --help` for the available commands.

fn main() -> anyhow::Result<()> {
    erd_cli::run()
}
