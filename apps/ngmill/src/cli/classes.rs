//! `ngmill classes`

use anyhow::{Context, Result};
use ngmill_ast::{ParseOptions, Project, SourceDocument};
use ngmill_config::AppConfig;
use ngmill_foundation::ErrorReport;
use ngmill_lang_angular::{kinds_of, ClassRef, ClassSource, DecoratorKind};
use serde::Serialize;
use std::path::Path;

/// One listed class
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassEntry {
    path: String,
    name: String,
    kinds: Vec<DecoratorKind>,
    exported: bool,
}

impl ClassEntry {
    fn from_class(class: &ClassRef<'_>, kinds: Vec<DecoratorKind>) -> Self {
        Self {
            path: class
                .path()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            name: class.name().unwrap_or("<default>").to_string(),
            kinds,
            exported: class.is_exported(),
        }
    }

    fn to_line(&self) -> String {
        let kinds: Vec<&str> = self.kinds.iter().map(|kind| kind.name()).collect();
        format!("{}:{}\t{}", self.path, self.name, kinds.join(","))
    }
}

/// `--format json` output
#[derive(Debug, Serialize)]
struct ClassListing {
    classes: Vec<ClassEntry>,
    skipped: Vec<ErrorReport>,
}

/// One report per file the project could not parse
fn skipped_reports(project: &Project) -> Vec<ErrorReport> {
    project
        .skipped()
        .iter()
        .map(|(path, error)| ErrorReport::from(error).with_file(path.display().to_string()))
        .collect()
}

pub fn handle_classes(
    config: &AppConfig,
    options: &ParseOptions,
    path: &Path,
    kind: Option<DecoratorKind>,
    format: &str,
) -> Result<()> {
    let _span = ngmill_config::logging::file_span(&path.display().to_string(), "classes").entered();

    let project = if path.is_file() {
        let mut project = Project::new();
        project.add(SourceDocument::from_path(path, options)?);
        project
    } else {
        Project::load(path, &config.project, options)
            .with_context(|| format!("Failed to load project at {}", path.display()))?
    };

    let listing = ClassListing {
        classes: collect_entries(&project, kind),
        skipped: skipped_reports(&project),
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for entry in &listing.classes {
            println!("{}", entry.to_line());
        }
        for report in &listing.skipped {
            eprintln!("skipped: {}", report);
        }
    }

    Ok(())
}

fn collect_entries(project: &Project, kind: Option<DecoratorKind>) -> Vec<ClassEntry> {
    project
        .classes()
        .filter_map(|class| {
            let kinds = kinds_of(&class);
            let wanted = match kind {
                Some(kind) => kinds.contains(&kind),
                None => !kinds.is_empty(),
            };
            wanted.then(|| ClassEntry::from_class(&class, kinds))
        })
        .collect()
}
