//! emx-zipgen CLI
//!
//! Create a Rust source file that embeds a file or directory tree and can
//! unzip it back to the file system.

use anyhow::Result;
use clap::Parser;
use emx_zipgen::generator::{DEFAULT_NAMESPACE, DEFAULT_OUTPUT};
use emx_zipgen::{
    build_archive, resolve_output_path, walk, GenerateConfig, Generator, RootName, Scheme,
    WalkConfig,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "emx-zipgen")]
#[command(author = "nzinfo <li.monan@gmail.com>")]
#[command(version)]
#[command(about = "Embed a file or directory tree in a Rust source file")]
struct Cli {
    /// File or directory to embed
    path: PathBuf,

    /// Name of the generated module
    #[arg(short = 'n', long, visible_alias = "package", default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Output file (a bare name gets the .rs extension)
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT)]
    output: String,

    /// Write only the zip data constant, without the unzip routine
    #[arg(short = 'd', long)]
    data: bool,

    /// List files and directories as they are added
    #[arg(short = 'l', long)]
    log: bool,

    /// Skip files and directories with this name (repeatable)
    #[arg(short = 'x', long, value_name = "NAME")]
    exclude: Vec<String>,

    /// Literal encoding of the zip data
    #[arg(short = 'e', long, value_enum, default_value_t = Scheme::Escape)]
    encoding: Scheme,

    /// Name a single-file root by its path as given instead of its base name
    #[arg(long)]
    full_path: bool,

    /// Do not add entries for directories
    #[arg(long)]
    no_dir_entries: bool,

    /// Generate an unzip routine without the replace parameter that always overwrites
    #[arg(long)]
    always_replace: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let output = resolve_output_path(&cli.output)?;
    let generator = Generator::new(GenerateConfig {
        namespace: cli.namespace,
        data_only: cli.data,
        scheme: cli.encoding,
        replace_flag: !cli.always_replace,
    })?;

    let walk_config = WalkConfig {
        root_name: if cli.full_path { RootName::FullPath } else { RootName::BaseName },
        directory_entries: !cli.no_dir_entries,
        exclude: cli.exclude,
    };

    let entries = walk(&cli.path, &walk_config)?;
    if cli.log {
        for entry in &entries {
            println!("{}", entry.name);
        }
    }

    let archive = build_archive(&entries)?;
    let size = generator.generate_to_file(&archive, &output)?;

    println!("Wrote zip data to {} ({} bytes)", output.display(), size);
    Ok(())
}
