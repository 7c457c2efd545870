use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "lawchunk",
    version,
    about = "Section-level chunking for parsed legislation documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Chunk(ChunkArgs),
    Status(StatusArgs),
    Inspect(InspectArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum DocTypeArg {
    Auto,
    InlineHeading,
    NumberedClause,
}

impl DocTypeArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::InlineHeading => "inline-heading",
            Self::NumberedClause => "numbered-clause",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ChunkArgs {
    #[arg(long, default_value = ".cache/lawchunk")]
    pub store_root: PathBuf,

    #[arg(long, value_enum, default_value_t = DocTypeArg::Auto)]
    pub doc_type: DocTypeArg,

    #[arg(long)]
    pub jurisdiction: Option<String>,

    #[arg(long)]
    pub max_pages_per_doc: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/lawchunk")]
    pub store_root: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long, default_value = ".cache/lawchunk")]
    pub store_root: PathBuf,

    #[arg(long)]
    pub document: String,

    #[arg(long, value_enum, default_value_t = DocTypeArg::Auto)]
    pub doc_type: DocTypeArg,

    #[arg(long, default_value_t = 5)]
    pub page_limit: usize,
}
