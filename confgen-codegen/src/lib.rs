//! The confgen accessor compiler.
//!
//! Walks a [`confgen_registry::PropertyRegistry`] in one pass and
//! emits:
//! - a declaration surface — a Rust trait with one typed read (and,
//!   where writable, write) operation per property
//! - an implementation surface — generated getter/setter bodies over a
//!   `confgen_layers::ConfigStore`, a per-accessor dependency table,
//!   and the two key validation tables
//!
//! The pass is sequential and deterministic: descriptors are
//! self-contained, so the same registry always yields byte-identical
//! artifacts. Errors are fatal; there is no partial output.

mod artifact;
pub mod catalog;
mod compiler;
mod tables;

pub use artifact::Artifacts;
pub use compiler::{AccessorCompiler, CompiledOutput, CompilerOptions};
pub use tables::KeyRegistryEmitter;

use confgen_registry::RegistryError;
use confgen_types::TypeError;

/// Fatal compilation errors, reported with the offending property.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Registration failed while building the registry.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A descriptor's type has no transport mapping.
    #[error("property {alias:?}: {source}")]
    Type { alias: String, source: TypeError },

    /// Artifact writing failed.
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// Compiles the built-in property catalog with default options.
pub fn compile_builtins() -> Result<CompiledOutput, CompileError> {
    let registry = catalog::builtin_registry()?;
    AccessorCompiler::new(CompilerOptions::default()).compile(&registry)
}
