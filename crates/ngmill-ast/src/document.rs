//! Parsing and emission of a single TypeScript file

use ngmill_config::ParserConfig;
use ngmill_foundation::{NgError, NgResult};
use std::path::{Path, PathBuf};
use swc_common::{
    comments::SingleThreadedComments, sync::Lrc, FileName, FilePathMapping, SourceMap,
};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter};
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};
use tracing::{debug, warn};

/// Options controlling how source text is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept decorator syntax (required for Angular classes)
    pub decorators: bool,
    /// Force TSX on or off; `None` enables it for `.tsx`/`.jsx` files
    pub tsx: Option<bool>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            decorators: true,
            tsx: None,
        }
    }
}

impl From<&ParserConfig> for ParseOptions {
    fn from(config: &ParserConfig) -> Self {
        Self {
            decorators: config.decorators,
            tsx: config.tsx,
        }
    }
}

impl ParseOptions {
    fn syntax_for(&self, path: &Path) -> Syntax {
        let tsx = self.tsx.unwrap_or_else(|| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("tsx") | Some("jsx")
            )
        });

        Syntax::Typescript(TsSyntax {
            tsx,
            decorators: self.decorators,
            dts: path.to_string_lossy().ends_with(".d.ts"),
            ..Default::default()
        })
    }
}

/// One parsed TypeScript file
///
/// The document owns the AST; edits made through [`SourceDocument::module_mut`]
/// are reflected by [`SourceDocument::emit`].
pub struct SourceDocument {
    path: PathBuf,
    module: Module,
    source_map: Lrc<SourceMap>,
    comments: SingleThreadedComments,
}

impl std::fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDocument")
            .field("path", &self.path)
            .field("items", &self.module.body.len())
            .finish()
    }
}

impl SourceDocument {
    /// Parse `source` as the contents of `path`
    ///
    /// The path does not need to exist; it names the document and selects
    /// TSX parsing by extension.
    pub fn parse(
        path: impl Into<PathBuf>,
        source: impl Into<String>,
        options: &ParseOptions,
    ) -> NgResult<Self> {
        let path = path.into();
        let source_map: Lrc<SourceMap> = Lrc::new(SourceMap::new(FilePathMapping::empty()));
        let file_name = Lrc::new(FileName::Real(path.clone()));
        let source_file = source_map.new_source_file(file_name, source.into());
        let comments = SingleThreadedComments::default();

        let lexer = Lexer::new(
            options.syntax_for(&path),
            EsVersion::default(),
            StringInput::from(&*source_file),
            Some(&comments),
        );
        let mut parser = Parser::new_from(lexer);

        let module = parser.parse_module().map_err(|e| {
            NgError::parse(path.display().to_string(), format!("{:?}", e.kind()))
        })?;

        for recovered in parser.take_errors() {
            warn!(
                file_path = %path.display(),
                error = ?recovered.kind(),
                "Recovered from syntax error"
            );
        }

        debug!(
            file_path = %path.display(),
            items = module.body.len(),
            "Parsed source document"
        );

        Ok(Self {
            path,
            module,
            source_map,
            comments,
        })
    }

    /// Parse `source` with default options
    pub fn from_source(path: impl Into<PathBuf>, source: impl Into<String>) -> NgResult<Self> {
        Self::parse(path, source, &ParseOptions::default())
    }

    /// Read and parse a file from disk
    pub fn from_path(path: impl AsRef<Path>, options: &ParseOptions) -> NgResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        Self::parse(path, source, options)
    }

    /// Path naming this document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed module
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// The parsed module, for in-place edits
    pub fn module_mut(&mut self) -> &mut Module {
        &mut self.module
    }

    /// Consume the document, keeping only its module
    pub fn into_module(self) -> Module {
        self.module
    }

    /// Serialize the current state of the module back to source text
    pub fn emit(&self) -> NgResult<String> {
        let mut buf = vec![];
        {
            let mut emitter = Emitter {
                cfg: Default::default(),
                cm: self.source_map.clone(),
                comments: Some(&self.comments),
                wr: JsWriter::new(self.source_map.clone(), "\n", &mut buf, None),
            };

            emitter
                .emit_module(&self.module)
                .map_err(|e| NgError::emit(format!("Failed to emit {}: {}", self.path.display(), e)))?;
        }

        Ok(String::from_utf8(buf)?)
    }

    /// Emit the document and write it back to its path
    pub fn write(&self) -> NgResult<()> {
        let code = self.emit()?;
        std::fs::write(&self.path, code)?;
        debug!(file_path = %self.path.display(), "Wrote source document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_ecma_ast::{ModuleDecl, ModuleItem};

    #[test]
    fn test_parse_decorated_class() {
        let doc = SourceDocument::from_source(
            "test.ts",
            r#"
import { Component } from '@angular/core';

@Component({ selector: 'app-root' })
export class AppComponent {}
"#,
        )
        .unwrap();

        assert_eq!(doc.path(), Path::new("test.ts"));
        assert_eq!(doc.module().body.len(), 2);
        assert!(matches!(
            doc.module().body[0],
            ModuleItem::ModuleDecl(ModuleDecl::Import(_))
        ));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = SourceDocument::from_source("broken.ts", "import { from ;").unwrap_err();
        match err {
            NgError::Parse { file, .. } => assert_eq!(file, "broken.ts"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tsx_follows_extension_or_override() {
        let source = "export const view = <div>hello</div>;";
        assert!(SourceDocument::from_source("view.tsx", source).is_ok());

        let forced = ParseOptions {
            tsx: Some(true),
            ..Default::default()
        };
        assert!(SourceDocument::parse("view.ts", source, &forced).is_ok());
    }

    #[test]
    fn test_parse_options_from_config() {
        let config = ParserConfig {
            decorators: false,
            tsx: Some(false),
        };
        let options = ParseOptions::from(&config);
        assert!(!options.decorators);
        assert_eq!(options.tsx, Some(false));
    }

    #[test]
    fn test_emit_reflects_edits() {
        let mut doc = SourceDocument::from_source(
            "test.ts",
            "import { a } from 'm';\nexport const x = 1;\n",
        )
        .unwrap();

        doc.module_mut().body.remove(0);
        let code = doc.emit().unwrap();

        assert!(!code.contains("import"));
        assert!(code.contains("export const x = 1;"));
    }

    #[test]
    fn test_emit_keeps_comments() {
        let doc = SourceDocument::from_source(
            "test.ts",
            "// header comment\nexport class Foo {}\n",
        )
        .unwrap();

        assert!(doc.emit().unwrap().contains("// header comment"));
    }
}
