use anyhow::Context;
use clap::Parser;
use humansize::{BINARY, format_size};
use log::info;
use std::io::{self, BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use ltcode::constants::{DEFAULT_BLOCK_SIZE, WRITE_BUFFER_SIZE};
use ltcode::protocol::coding::{BlockEncoder, SourceStore};
use ltcode::util::{file::open_checked, fresh_seed, logger, manifest::SessionManifest};

#[derive(Parser, Debug)]
#[command(author, version, about = "Stream LT coded blocks of a file to stdout.", long_about = None)]
struct Args {
    /// The path to the file to encode.
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Payload bytes per coded block.
    #[arg(short, long, value_name = "BYTES", default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u32,

    /// Starting seed (random when omitted).
    #[arg(short, long)]
    seed: Option<u32>,

    /// Stop after this many blocks instead of streaming forever.
    #[arg(short, long)]
    count: Option<usize>,

    /// Record the session (starting seed, sizes, content hash) to this TOML file.
    #[arg(short, long, value_name = "MANIFEST")]
    manifest: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let (file, length, file_name) = open_checked(&args.file)
        .with_context(|| format!("opening {}", args.file.display()))?;
    let seed = args.seed.unwrap_or_else(fresh_seed);

    let source = SourceStore::from_reader(BufReader::new(file), length, args.block_size)
        .with_context(|| format!("loading {}", args.file.display()))?;
    info!(
        "Loaded {} ({}), starting seed {}",
        file_name,
        format_size(length, BINARY),
        seed
    );

    if let Some(path) = &args.manifest {
        SessionManifest::describe(file_name, &source, seed).save(path)?;
        info!("Session manifest written to {}", path.display());
    }

    let encoder = BlockEncoder::from_store(source, seed);
    let mut out = BufWriter::with_capacity(WRITE_BUFFER_SIZE, io::stdout().lock());
    let mut sent = 0usize;

    for block in encoder.take(args.count.unwrap_or(usize::MAX)) {
        let block = block?;
        if let Err(err) = out.write_all(&block.to_bytes()) {
            return closed_or_failed(err, sent);
        }
        sent += 1;
    }

    if let Err(err) = out.flush() {
        return closed_or_failed(err, sent);
    }
    info!("Sent {sent} blocks");
    Ok(())
}

/// A reader hanging up is how an unbounded stream normally ends.
fn closed_or_failed(err: io::Error, sent: usize) -> anyhow::Result<()> {
    if err.kind() == ErrorKind::BrokenPipe {
        info!("Output closed after {sent} blocks");
        return Ok(());
    }
    Err(err).context(format!("writing block {sent} to stdout"))
}
