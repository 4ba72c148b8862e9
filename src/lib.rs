//! # emx-zipgen
//!
//! Embed a file or directory tree in Rust source code.
//!
//! The tree is packed into an in-memory zip container, the container bytes
//! are rendered as a Rust literal, and a module is generated that holds the
//! literal as a `zipdata` constant together with an `unzip` routine that
//! writes the tree back to disk at runtime.
//!
//! ## Pipeline
//!
//! ```text
//! walk -> build_archive -> Scheme::encode -> Generator
//! ```
//!
//! ## Schemes
//!
//! - **Escape** (default): a byte string `b"..."`. Printable ASCII is kept
//!   as is, `\n \r \t \" \\` use their short escapes and every other byte
//!   is written as `\xHH`. Lines are broken with `\` continuations every
//!   80 encoded characters. The generated code needs only the `zip` crate.
//! - **Base64**: a string `"..."` of standard base64, wrapped every 60
//!   characters. The generated code strips whitespace and decodes with the
//!   `base64` crate before opening the container.
//!
//! Both schemes decode exactly back to the container bytes with
//! [`Scheme::decode`].
//!
//! ## Example
//!
//! ```no_run
//! use emx_zipgen::{build_archive, walk, GenerateConfig, Generator, WalkConfig};
//! use std::path::Path;
//!
//! let entries = walk(Path::new("static"), &WalkConfig::default())?;
//! let archive = build_archive(&entries)?;
//! let generator = Generator::new(GenerateConfig::default())?;
//! let size = generator.generate_to_file(&archive, Path::new("src/unzip.rs"))?;
//! println!("wrote {} bytes", size);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod archive;
pub mod decoder;
pub mod encoder;
pub mod extract;
pub mod generator;
pub mod walker;

pub use archive::{build_archive, list_entries, read_entries, ArchiveBuilder, Entry};
pub use decoder::DecodeError;
pub use encoder::Scheme;
pub use extract::{extract, extract_literal, ExtractConfig, ExtractSummary};
pub use generator::{resolve_output_path, GenerateConfig, Generator};
pub use walker::{walk, RootName, WalkConfig, WalkEntry};
