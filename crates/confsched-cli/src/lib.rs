//! CLI logic for the confsched tool.
//!
//! [`run`] takes a conference directory through the whole pipeline: parse the
//! program document, discover the item documents and produce every enabled
//! document into a freshly recreated output directory.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Instant,
};

use log::{debug, info, warn};

use confsched::{
    ConfschedError, ScheduleBuilder,
    discover::{ItemFile, discover_items},
    export::{LatexRenderer, Producer, Renderer, TexSourceRenderer},
};

/// Run the confsched CLI application
///
/// Returns the paths of the published artifacts, in production order: item
/// documents, the master document, room signage, chair packets.
///
/// # Errors
///
/// Returns `ConfschedError` for:
/// - Configuration loading or validation errors
/// - A missing program document or item file
/// - Malformed program annotations
/// - Renderer failures
/// - Other file I/O errors
pub fn run(args: &Args) -> Result<Vec<PathBuf>, ConfschedError> {
    let started = Instant::now();

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(program) = &args.program {
        app_config = app_config.with_program(program);
    }
    app_config.validate()?;

    let dir = PathBuf::from(&args.dir);
    let output_dir = args
        .output
        .as_ref()
        .map_or_else(|| dir.join("output"), PathBuf::from);
    let program_path = dir.join(app_config.program());

    info!(
        dir = args.dir,
        program = program_path.display().to_string(),
        output = output_dir.display().to_string();
        "Processing conference"
    );

    let builder = ScheduleBuilder::new(app_config);

    // The program is parsed before anything is cleared or rendered.
    let rooms = if args.no_rooms {
        None
    } else {
        let source =
            fs::read_to_string(&program_path).map_err(|source| ConfschedError::MissingInput {
                path: program_path.clone(),
                source,
            })?;
        let schedule = builder.parse(&source)?;
        Some(builder.assemble(&schedule))
    };

    let program_name = program_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let items = discover_items(&dir, &[program_name])?;
    info!(count = items.len(); "Items discovered");

    if !args.no_items {
        let mut jobs = Vec::new();
        if !args.no_master {
            jobs.push(builder.config().jobs().master());
        }
        if rooms.as_ref().is_some_and(|rooms| !rooms.signage().is_empty()) {
            jobs.extend([builder.config().jobs().rooms(), builder.config().jobs().chairs()]);
        }
        check_item_names(&items, &jobs)?;
    }

    prepare_output_dir(&output_dir, &dir)?;

    let latex;
    let renderer: &dyn Renderer = if args.tex_only {
        &TexSourceRenderer
    } else {
        latex = LatexRenderer::new(builder.config().renderer().clone());
        &latex
    };

    let mut producer = Producer::new(renderer, &output_dir)
        .with_scratch_root(builder.config().scratch_root().map(Path::to_path_buf))
        .with_keep_going(args.keep_going);

    if !args.no_items {
        for item in &items {
            producer.produce(&builder.render_single(item))?;
        }
    }
    if !args.no_master {
        if items.is_empty() {
            warn!(dir = args.dir; "No items found, skipping the master document");
        } else {
            producer.produce(&builder.render_master(&items))?;
        }
    }
    if let Some(rooms) = &rooms {
        if rooms.signage().is_empty() {
            warn!(
                program = program_path.display().to_string();
                "No parallel sessions found, skipping room signage and chair packets"
            );
        } else {
            producer.produce(&builder.render_rooms(rooms, &dir))?;
            producer.produce(&builder.render_chairs(rooms, &dir))?;
        }
    }

    let produced = producer.finish()?;
    info!(
        documents = produced.len(),
        elapsed:? = started.elapsed();
        "All documents produced"
    );

    Ok(produced)
}

/// Refuse items whose own document would share a job name with a combined
/// document of this run.
fn check_item_names(items: &[ItemFile], jobs: &[&str]) -> Result<(), ConfschedError> {
    let clash = items
        .iter()
        .find(|item| jobs.iter().any(|job| *job == item.stem()));

    match clash {
        Some(item) => Err(ConfschedError::Config(format!(
            "item `{}` has the same name as the `{}` job; rename the item or set another name under [jobs]",
            item.path().display(),
            item.stem()
        ))),
        None => Ok(()),
    }
}

/// Remove and recreate `output`.
///
/// Refuses to clear a directory that contains the conference directory or the
/// current working directory.
fn prepare_output_dir(output: &Path, conference_dir: &Path) -> Result<(), ConfschedError> {
    if output.exists() {
        let target = fs::canonicalize(output)?;
        let protected = [fs::canonicalize(conference_dir)?, env::current_dir()?];

        if let Some(dir) = protected.iter().find(|dir| dir.starts_with(&target)) {
            return Err(ConfschedError::Config(format!(
                "refusing to clear output directory `{}`: it contains `{}`",
                output.display(),
                dir.display()
            )));
        }

        debug!(path = target.display().to_string(); "Clearing output directory");
        fs::remove_dir_all(&target)?;
    }

    fs::create_dir_all(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_prepare_output_dir_recreates() {
        let conf = tempdir().unwrap();
        let output = conf.path().join("output");
        fs::create_dir(&output).unwrap();
        fs::write(output.join("stale.pdf"), "").unwrap();

        prepare_output_dir(&output, conf.path()).unwrap();

        assert!(output.is_dir());
        assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
    }

    #[test]
    fn test_prepare_output_dir_refuses_conference_dir() {
        let conf = tempdir().unwrap();
        fs::write(conf.path().join("program.tex"), "").unwrap();

        let err = prepare_output_dir(conf.path(), conf.path()).unwrap_err();

        assert!(matches!(err, ConfschedError::Config(_)));
        assert!(conf.path().join("program.tex").exists());
    }

    #[test]
    fn test_prepare_output_dir_refuses_ancestor() {
        let root = tempdir().unwrap();
        let conf = root.path().join("conf");
        fs::create_dir(&conf).unwrap();

        let err = prepare_output_dir(root.path(), &conf).unwrap_err();
        assert!(matches!(err, ConfschedError::Config(_)));
        assert!(conf.is_dir());
    }

    #[test]
    fn test_check_item_names_rejects_job_name() {
        let conf = tempdir().unwrap();
        let items: Vec<_> = ["rooms.tex", "talk1.tex"]
            .iter()
            .filter_map(|name| ItemFile::new(conf.path().join(name)))
            .collect();

        let err = check_item_names(&items, &["abstracts", "rooms", "chairs"]).unwrap_err();
        assert!(matches!(err, ConfschedError::Config(ref msg) if msg.contains("rooms.tex")));

        assert!(check_item_names(&items, &["abstracts"]).is_ok());
    }
}
