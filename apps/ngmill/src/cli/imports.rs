//! `ngmill add-import`, `remove-import` and `prune-imports`

use super::ImportEditArgs;
use anyhow::{Context, Result};
use ngmill_ast::ast::Module;
use ngmill_ast::{ParseOptions, SourceDocument};
use ngmill_config::logging::file_span;
use ngmill_lang_angular::{apply_import_descriptor, prune_unused_imports, remove_imports, ImportDescriptor};
use tracing::{debug, info};

pub fn handle_add(options: &ParseOptions, args: &ImportEditArgs, names: Vec<String>) -> Result<()> {
    let descriptor = ImportDescriptor::new(args.module.as_str()).with_names(names);
    rewrite_files(options, args, "add-import", |module| {
        apply_import_descriptor(module, &descriptor)
    })
}

pub fn handle_remove(options: &ParseOptions, args: &ImportEditArgs, names: &[String]) -> Result<()> {
    rewrite_files(options, args, "remove-import", |module| {
        let items = module.body.len();
        let removed = remove_imports(module, &args.module, names);
        // A declaration without named imports goes even when no name matched
        removed + (items - module.body.len())
    })
}

pub fn handle_prune(options: &ParseOptions, args: &ImportEditArgs) -> Result<()> {
    rewrite_files(options, args, "prune-imports", |module| {
        prune_unused_imports(module, &args.module)
    })
}

/// Apply `edit` to every file, then print or write the result
///
/// `edit` returns the number of changes it made. In write mode only
/// changed files are written.
fn rewrite_files<F>(options: &ParseOptions, args: &ImportEditArgs, command: &str, mut edit: F) -> Result<()>
where
    F: FnMut(&mut Module) -> usize,
{
    let with_headers = !args.write && args.files.len() > 1;

    for file in &args.files {
        let _span = file_span(&file.display().to_string(), command).entered();

        let mut document = SourceDocument::from_path(file, options)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let changed = edit(document.module_mut());
        debug!(module = %args.module, changed, "Applied import edit");

        if args.write {
            if changed > 0 {
                document
                    .write()
                    .with_context(|| format!("Failed to write {}", file.display()))?;
                info!(changed, "Updated file");
                println!("updated {} ({} change(s))", file.display(), changed);
            }
        } else {
            if with_headers {
                println!("// ==> {} <==", file.display());
            }
            print!("{}", document.emit()?);
        }
    }

    Ok(())
}
