//! Command implementations
//!
//! Each command writes its report to `out` so it can be captured in tests.
//! Machine-readable output (DDL, JSON, SVG path data) is never colored.

use crate::cli::Command;
use crate::config::Config;
use anyhow::Context;
use colored::Colorize;
use erd_canvas::{cardinality_markers, connector_path};
use erd_codegen::{DdlGenerator, GenerationSummary};
use erd_core::{Side, Validatable};
use erd_ir::{Attribute, SchemaStore, load_schema, save_schema, save_schema_to_string};
use std::io::Write;
use std::path::Path;

/// Run one command against the given configuration
pub fn execute(command: &Command, config: &Config, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Command::Generate {
            input,
            output,
            write,
            no_comments,
        } => {
            let store = load_store(input.as_deref())?;
            let mut generator_config = config.generator.clone();
            if *no_comments {
                generator_config = generator_config.without_comments();
            }
            if let Some(path) = output {
                generator_config = generator_config.with_output(path);
            }
            generate(&store, DdlGenerator::new(generator_config), output.is_some() || *write, out)
        }
        Command::Sample { output } => sample(output.as_deref(), out),
        Command::Validate { input, strict } => validate(&load_store(input.as_deref())?, *strict, out),
        Command::Info { input } => info(&load_store(input.as_deref())?, out),
        Command::Geometry { input } => geometry(&load_store(input.as_deref())?, out),
    }
}

/// Snapshot from `input`, or the sample schema
pub fn load_store(input: Option<&Path>) -> anyhow::Result<SchemaStore> {
    match input {
        Some(path) => load_schema(path).context("failed to load schema"),
        None => {
            tracing::debug!("no input given, using the sample schema");
            Ok(SchemaStore::sample())
        }
    }
}

fn generate(
    store: &SchemaStore,
    generator: DdlGenerator,
    to_file: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if !to_file {
        let file = generator.generate(store);
        write!(out, "{}", file.content)?;
        return Ok(());
    }

    let (_, path) = generator
        .generate_and_write(store, "")
        .context("failed to write DDL")?;
    writeln!(
        out,
        "{} {} ({})",
        "Wrote".green().bold(),
        path.display(),
        GenerationSummary::from_store(store)
    )?;
    Ok(())
}

fn sample(output: Option<&Path>, out: &mut dyn Write) -> anyhow::Result<()> {
    let store = SchemaStore::sample();
    match output {
        Some(path) => {
            save_schema(&store, path).context("failed to write sample schema")?;
            writeln!(out, "{} {}", "Wrote".green().bold(), path.display())?;
        }
        None => writeln!(out, "{}", save_schema_to_string(&store)?)?,
    }
    Ok(())
}

fn validate(store: &SchemaStore, strict: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let problems = store.validation_errors();
    if problems.is_empty() {
        writeln!(
            out,
            "{} schema is valid ({} entities, {} relations)",
            "✓".green().bold(),
            store.entity_count(),
            store.relation_count()
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "{} {} problem(s) found",
        "⚠".yellow().bold(),
        problems.len()
    )?;
    for problem in &problems {
        writeln!(out, "  - {}", problem)?;
    }

    if strict {
        anyhow::bail!("schema has {} validation problem(s)", problems.len());
    }
    Ok(())
}

fn info(store: &SchemaStore, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "{} ({})", "Entities".bold(), store.entity_count())?;
    for entity in store.entities() {
        writeln!(
            out,
            "  {} [{}] at ({}, {})",
            entity.name.cyan().bold(),
            entity.entity_type,
            entity.position.x,
            entity.position.y
        )?;
        for attribute in &entity.attributes {
            writeln!(out, "    {}", describe_attribute(attribute))?;
        }
    }

    writeln!(out, "{} ({})", "Relations".bold(), store.relation_count())?;
    for relation in store.relations() {
        let mut line = format!(
            "  {} {} {}",
            store.entity_name(relation.from),
            relation.cardinality,
            store.entity_name(relation.to)
        );
        if let Some(target) = relation.fk_target_entity_id.filter(|_| relation.has_fk_column()) {
            line.push_str(&format!(" via {}.{}", store.entity_name(target), relation.fk_column));
        }
        if !relation.label.is_empty() {
            line.push_str(&format!(" \"{}\"", relation.label));
        }
        writeln!(out, "{}", line)?;
    }

    writeln!(out, "{} {}", "Summary:".bold(), GenerationSummary::from_store(store))?;
    Ok(())
}

fn describe_attribute(attribute: &Attribute) -> String {
    let mut flags = Vec::new();
    if attribute.pk {
        flags.push("PK".to_string());
    }
    if attribute.fk {
        if attribute.has_resolved_fk() {
            flags.push(format!(
                "FK -> {}.{}",
                attribute.fk_ref.table, attribute.fk_ref.column
            ));
        } else {
            flags.push("FK (unresolved)".to_string());
        }
    }
    if attribute.nn {
        flags.push("NN".to_string());
    }
    if attribute.unique {
        flags.push("UQ".to_string());
    }
    if attribute.auto_increment {
        flags.push("AI".to_string());
    }

    if flags.is_empty() {
        format!("{} {}", attribute.name, attribute.type_display())
    } else {
        format!(
            "{} {} {}",
            attribute.name,
            attribute.type_display(),
            flags.join(", ").dimmed()
        )
    }
}

fn geometry(store: &SchemaStore, out: &mut dyn Write) -> anyhow::Result<()> {
    for relation in store.relations() {
        let Some(path) = connector_path(store, relation) else {
            writeln!(
                out,
                "relation {}: {}",
                relation.id,
                "missing endpoint, skipped".yellow()
            )?;
            continue;
        };

        writeln!(
            out,
            "relation {}: {} {} {}",
            relation.id,
            store.entity_name(relation.from),
            relation.cardinality,
            store.entity_name(relation.to)
        )?;
        writeln!(out, "  path {}", path.to_svg())?;
        for side in [Side::From, Side::To] {
            for segment in cardinality_markers(store, relation, side) {
                writeln!(out, "  {:<4} {}", side.to_string(), segment.to_svg())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use erd_ir::{EntityTemplate, RelationTemplate};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn run(command: Command) -> anyhow::Result<String> {
        colored::control::set_override(false);
        let mut out = Vec::new();
        execute(&command, &Config::default(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_generate_sample_to_stdout() {
        let output = run(Command::Generate {
            input: None,
            output: None,
            write: false,
            no_comments: false,
        })
        .unwrap();

        assert!(output.starts_with("-- ERD Builder Pro\n\nCREATE TABLE User (\n"));
        assert!(output.contains("  FOREIGN KEY (user_id) REFERENCES User(id)\n"));
    }

    #[test]
    fn test_generate_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("schema.sql");

        let output = run(Command::Generate {
            input: None,
            output: Some(path.clone()),
            write: false,
            no_comments: true,
        })
        .unwrap();

        assert!(output.starts_with("Wrote"));
        assert!(output.contains("2 tables"));
        let ddl = std::fs::read_to_string(&path).unwrap();
        assert!(ddl.contains("CREATE TABLE Post ("));
    }

    #[test]
    fn test_sample_round_trip_through_input() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blog.json");

        run(Command::Sample {
            output: Some(path.clone()),
        })
        .unwrap();
        let from_file = run(Command::Info {
            input: Some(path),
        })
        .unwrap();
        let from_sample = run(Command::Info { input: None }).unwrap();

        assert_eq!(from_file, from_sample);
    }

    #[test]
    fn test_info_lists_entities_and_relations() {
        let output = run(Command::Info { input: None }).unwrap();

        assert!(output.contains("Entities (2)"));
        assert!(output.contains("  User [parent] at (50, 50)"));
        assert!(output.contains("    user_id INT FK -> User.id, NN"));
        assert!(output.contains("  User 1:N Post via Post.user_id"));
        assert!(output.contains("Summary: 2 tables, 6 columns"));
    }

    #[test]
    fn test_geometry_output() {
        let output = run(Command::Geometry { input: None }).unwrap();
        assert_eq!(
            output,
            "relation 1: User 1:N Post\n\
             \x20 path M290,100 C335,100 335,100 380,100\n\
             \x20 from M295,94 L295,106\n\
             \x20 to   M380,100 L370,95\n\
             \x20 to   M380,100 L370,105\n\
             \x20 to   M380,100 L370,100\n"
        );
    }

    #[test]
    fn test_validate_reports_problems() {
        let output = run(Command::Validate {
            input: None,
            strict: true,
        })
        .unwrap();
        assert!(output.contains("schema is valid (2 entities, 1 relations)"));

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        let mut store = SchemaStore::sample();
        store.add_entity(EntityTemplate::new("User"));
        store.add_relation(RelationTemplate::new(1, 99, "1:N"));
        save_schema(&store, &path).unwrap();

        let lenient = run(Command::Validate {
            input: Some(path.clone()),
            strict: false,
        })
        .unwrap();
        assert!(lenient.contains("2 problem(s) found"));
        assert!(lenient.contains("Duplicate entity name: 'User'"));

        let strict = run(Command::Validate {
            input: Some(path),
            strict: true,
        });
        assert!(strict.is_err());
    }

    #[test]
    fn test_missing_input_file() {
        let err = run(Command::Info {
            input: Some(PathBuf::from("/nonexistent/schema.json")),
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("failed to load schema"));
    }
}
