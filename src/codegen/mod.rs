//! Action handler code generation
//!
//! Parses an action SDL, builds the schema type map (declared types plus
//! one `<Action>Args` record per mutation) and renders a handler file per
//! target language.

pub mod lang;
pub mod schema;
pub mod sdl;

use std::path::{Path, PathBuf};
use thiserror::Error;

use lang::{Go, Language, Rust, TypeScript};
use schema::Schema;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("type '{0}' is defined more than once")]
    DuplicateType(String),

    #[error("unknown type '{type_name}' referenced by {referenced_by}")]
    UnknownType {
        type_name: String,
        referenced_by: String,
    },

    #[error("schema has no Mutation type")]
    MissingMutation,

    #[error("action '{0}' is not a field of Mutation")]
    UnknownAction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Target language selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Lang {
    Rust,
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    Go,
}

impl Lang {
    pub const ALL: [Self; 3] = [Self::Rust, Self::TypeScript, Self::Go];

    fn converter(self) -> &'static dyn Language {
        match self {
            Self::Rust => &Rust,
            Self::TypeScript => &TypeScript,
            Self::Go => &Go,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}

/// Generate `<Action>Handler.<ext>` for each requested language
pub fn templater(
    action_name: &str,
    sdl: &str,
    languages: &[Lang],
) -> Result<Vec<GeneratedFile>, CodegenError> {
    let schema = Schema::from_definitions(sdl::parse(sdl)?)?;
    // Fail on an unknown action even when no language was requested
    schema.find_action(action_name)?;

    languages
        .iter()
        .map(|lang| {
            let converter = lang.converter();
            Ok(GeneratedFile {
                name: format!("{action_name}Handler.{}", converter.extension()),
                content: lang::action_code(converter, &schema, action_name)?,
            })
        })
        .collect()
}

/// Write generated files into `out_dir`, creating it if needed
pub fn write_files(out_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, CodegenError> {
    std::fs::create_dir_all(out_dir)?;
    files
        .iter()
        .map(|file| {
            let path = out_dir.join(&file.name);
            std::fs::write(&path, &file.content)?;
            tracing::info!("Wrote {}", path.display());
            Ok(path)
        })
        .collect()
}
