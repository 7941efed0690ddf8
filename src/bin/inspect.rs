use anyhow::{Context, bail};
use clap::Parser;
use humansize::{BINARY, format_size};
use owo_colors::OwoColorize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use ltcode::protocol::coding::{SourceStore, plan_for_seed, xor_into};
use ltcode::protocol::wire::{BlockStreamReader, CodedBlock};
use ltcode::util::{file::open_checked, logger};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay the plan behind each block of an LT block stream.", long_about = None)]
struct Args {
    /// Block stream to read (stdin when omitted).
    #[arg(short, long, value_name = "STREAM")]
    input: Option<PathBuf>,

    /// Show at most this many blocks.
    #[arg(short, long)]
    limit: Option<usize>,

    /// Original file; every payload is rebuilt from it and compared.
    #[arg(short, long, value_name = "FILE")]
    source: Option<PathBuf>,
}

fn rebuild(block: &CodedBlock, source: &SourceStore) -> anyhow::Result<Vec<u8>> {
    let mut accum = vec![0u8; source.data_size() as usize];
    for index in plan_for_seed(block.seed, source.block_count())?.indices {
        xor_into(&mut accum, source.fetch(index))?;
    }
    Ok(accum)
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let input: Box<dyn Read> = match &args.input {
        Some(path) => {
            Box::new(File::open(path).with_context(|| format!("opening {}", path.display()))?)
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut source: Option<SourceStore> = None;
    let (mut shown, mut bytes, mut mismatched) = (0usize, 0usize, 0usize);

    let blocks = BlockStreamReader::new(BufReader::new(input));
    for block in blocks.take(args.limit.unwrap_or(usize::MAX)) {
        let block = block.with_context(|| format!("parsing block {shown}"))?;

        if source.is_none()
            && let Some(path) = &args.source
        {
            let (file, length, _) = open_checked(path)?;
            let store = SourceStore::from_reader(BufReader::new(file), length, block.block_size())?;
            source = Some(store);
        }

        let block_count = block.file_size.div_ceil(block.block_size());
        let plan = plan_for_seed(block.seed, block_count)?;
        print!(
            "#{:06} seed {:>10} size {} file {} degree {:>3} {:?}",
            shown.bright_blue(),
            block.seed.yellow(),
            block.block_size(),
            block.file_size,
            plan.degree.magenta(),
            plan.indices
        );

        match &source {
            Some(source)
                if source.file_size() != block.file_size
                    || source.data_size() != block.block_size() =>
            {
                println!();
                bail!(
                    "block {shown} belongs to a {}-byte file in {}-byte blocks, source is {}/{}",
                    block.file_size,
                    block.block_size(),
                    source.file_size(),
                    source.data_size()
                );
            }
            Some(source) => {
                if rebuild(&block, source)? == &block.payload[..] {
                    println!(" {}", "OK".green());
                } else {
                    mismatched += 1;
                    println!(" {}", "MISMATCH".red());
                }
            }
            None => println!(),
        }

        shown += 1;
        bytes += block.wire_len();
    }

    println!(
        "{} blocks, {}",
        shown.blue(),
        format_size(bytes, BINARY).yellow()
    );
    if mismatched > 0 {
        bail!("{mismatched} of {shown} payloads do not match the source");
    }
    Ok(())
}
