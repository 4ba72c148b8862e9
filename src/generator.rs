//! Rust source generation

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::encoder::Scheme;

/// First line of every generated file
pub const GENERATED_MARKER: &str = "// Code generated by emx-zipgen. DO NOT EDIT.";
/// Name of the generated constant
pub const DATA_CONSTANT: &str = "zipdata";
/// Module name used when none is given
pub const DEFAULT_NAMESPACE: &str = "assets";
/// Output file used when none is given
pub const DEFAULT_OUTPUT: &str = "unzip.rs";
/// Required extension of the output file
pub const OUTPUT_EXTENSION: &str = "rs";

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Configuration for source generation
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Name of the generated module
    pub namespace: String,
    /// Emit only the data constant, without the extraction routine
    pub data_only: bool,
    /// Literal encoding
    pub scheme: Scheme,
    /// Give the extraction routine a `replace` parameter. Without it the
    /// routine always overwrites.
    pub replace_flag: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data_only: false,
            scheme: Scheme::Escape,
            replace_flag: true,
        }
    }
}

/// Writes a container as a Rust module
pub struct Generator {
    config: GenerateConfig,
}

impl Generator {
    /// Create a generator, validating the module name
    pub fn new(config: GenerateConfig) -> Result<Self> {
        if !is_valid_identifier(&config.namespace) {
            bail!("Invalid module name: '{}'", config.namespace);
        }
        Ok(Self { config })
    }

    /// The configuration in use
    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Everything before the literal: module and constant declarations,
    /// plus the imports the extraction routine needs in full mode
    pub fn header(&self) -> String {
        let mut header = String::new();
        header.push_str(GENERATED_MARKER);
        header.push_str("\n\n#[allow(dead_code)]\n");
        header.push_str(&format!("pub mod {} {{\n", self.config.namespace));

        if !self.config.data_only {
            if self.config.scheme == Scheme::Base64 {
                header.push_str("    use base64::Engine;\n");
            }
            header.push_str("    use std::fs;\n");
            header.push_str("    use std::io;\n");
            header.push_str("    use std::path::Path;\n\n");
        }

        header.push_str("    #[allow(non_upper_case_globals)]\n");
        header.push_str(&format!(
            "    pub const {}: {} = ",
            DATA_CONSTANT,
            self.config.scheme.rust_type()
        ));
        header
    }

    /// Everything after the literal: the end of the constant, the
    /// extraction routine unless data-only, and the end of the module
    pub fn footer(&self) -> String {
        let mut footer = String::from(";\n");
        if !self.config.data_only {
            footer.push_str(&self.extraction_routine());
        }
        footer.push_str("}\n");
        footer
    }

    /// Render the full source unit
    pub fn generate(&self, archive: &[u8]) -> String {
        let mut output = self.header();
        output.push_str(&self.config.scheme.encode(archive));
        output.push_str(&self.footer());
        output
    }

    /// Write the source unit, returning the number of bytes written
    pub fn write_to<W: Write>(&self, archive: &[u8], mut writer: W) -> Result<usize> {
        let mut size = 0;
        for segment in [
            self.header(),
            self.config.scheme.encode(archive),
            self.footer(),
        ] {
            writer.write_all(segment.as_bytes())?;
            size += segment.len();
        }
        writer.flush()?;
        Ok(size)
    }

    /// Create or truncate `path` and write the source unit to it.
    ///
    /// A failure part way through leaves a partial file behind.
    pub fn generate_to_file(&self, archive: &[u8], path: &Path) -> Result<usize> {
        let file = fs::File::create(path)
            .with_context(|| format!("Failed to create: {}", path.display()))?;
        let size = self
            .write_to(archive, BufWriter::new(file))
            .with_context(|| format!("Failed to write: {}", path.display()))?;

        log::info!("wrote {} bytes to {}", size, path.display());
        Ok(size)
    }

    fn extraction_routine(&self) -> String {
        let mut routine = String::from("\n");

        if self.config.replace_flag {
            routine.push_str(
                "    /// Extracts the embedded zip data into `path`. When `replace` is false,\n    \
                 /// files that already exist are left untouched.\n    \
                 pub fn unzip(path: impl AsRef<Path>, replace: bool) -> Result<(), Box<dyn std::error::Error>> {\n",
            );
        } else {
            routine.push_str(
                "    /// Extracts the embedded zip data into `path`, replacing existing files.\n    \
                 pub fn unzip(path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {\n",
            );
        }

        match self.config.scheme {
            Scheme::Escape => routine.push_str("        let data = zipdata;\n"),
            Scheme::Base64 => routine.push_str(
                "        let text: String = zipdata.chars().filter(|c| !c.is_ascii_whitespace()).collect();\n        \
                 let data = base64::engine::general_purpose::STANDARD.decode(text)?;\n",
            ),
        }

        routine.push_str(EXTRACT_LOOP_HEAD);
        if self.config.replace_flag {
            routine.push_str(EXTRACT_SKIP_EXISTING);
        }
        routine.push_str(EXTRACT_LOOP_TAIL);
        routine
    }
}

const EXTRACT_LOOP_HEAD: &str = r#"        let mut archive = zip::ZipArchive::new(io::Cursor::new(data))?;

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.enclosed_name().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("invalid entry name: {}", entry.name()),
                )
            })?;
            let target = path.as_ref().join(name);

            if entry.is_dir() {
                create_dir_all(&target)?;
                continue;
            }
            if let Some(parent) = target.parent() {
                create_dir_all(parent)?;
            }
"#;

const EXTRACT_SKIP_EXISTING: &str = r#"            if !replace && target.exists() {
                continue;
            }
"#;

const EXTRACT_LOOP_TAIL: &str = r#"
            let mut file = fs::File::create(&target)?;
            io::copy(&mut entry, &mut file)?;
        }

        Ok(())
    }

    fn create_dir_all(path: &Path) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(path)
    }
"#;

/// Whether `name` can be used as a module name
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = match chars.next() {
        Some(c) => c == '_' || c.is_ascii_alphabetic(),
        None => false,
    };
    first_ok
        && name != "_"
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && !KEYWORDS.contains(&name)
}

/// Resolve the output file name: a bare name gets the `.rs` extension,
/// any other extension is rejected.
pub fn resolve_output_path(name: &str) -> Result<PathBuf> {
    let path = PathBuf::from(name);
    match path.extension() {
        None => Ok(path.with_extension(OUTPUT_EXTENSION)),
        Some(ext) if ext == OUTPUT_EXTENSION => Ok(path),
        Some(ext) => bail!(
            "Output file must have .{} extension, got .{}",
            OUTPUT_EXTENSION,
            ext.to_string_lossy()
        ),
    }
}
