#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("The d50 CLI requires the \"cli\" feature. Rebuild with `--features cli` to enable it.");
}

#[cfg(feature = "cli")]
mod cli {
    use std::path::PathBuf;

    use anyhow::{bail, Context};
    use clap::Parser;
    use d50::loader::write_all_bytes;
    use d50::{Dump, DumpFileLoader};

    #[derive(Parser)]
    #[command(name = "d50")]
    #[command(about = "Decode and convert Roland D-50 SysEx and bank dump files")]
    struct Args {
        /// Input dump (.syx or .bin)
        input: PathBuf,

        /// Write the dump to this file (.syx or .bin)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export the decoded dump as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Print a single patch (0-63) as JSON to stdout
        #[arg(short, long)]
        patch: Option<usize>,
    }

    fn list_patches(dump: &Dump) {
        // Device numbering: bank 1-8, number 1-8
        for (i, patch) in dump.patches.iter().enumerate() {
            println!("{}{}  {}", i / 8 + 1, i % 8 + 1, patch.display_name().trim_end());
        }
        if let Some(reverbs) = &dump.reverb_data {
            println!("{} reverb blocks", reverbs.len());
        }
    }

    pub fn run() -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();

        let args = Args::parse();

        let dump = DumpFileLoader::load(&args.input)
            .with_context(|| format!("failed to decode '{}'", args.input.display()))?;

        match args.patch {
            Some(index) => {
                let Some(patch) = dump.patches.get(index) else {
                    bail!("patch index {} out of range (0-{})", index, dump.patches.len() - 1);
                };
                println!("{}", serde_json::to_string(patch)?);
            }
            None => list_patches(&dump),
        }

        if let Some(path) = &args.json {
            let json = serde_json::to_vec(&dump)?;
            write_all_bytes(path, &json)?;
            tracing::info!(path = %path.display(), "wrote JSON export");
        }

        if let Some(path) = &args.output {
            DumpFileLoader::save(path, &dump)
                .with_context(|| format!("failed to encode '{}'", path.display()))?;
            tracing::info!(path = %path.display(), "wrote dump");
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
fn main() {
    if let Err(err) = cli::run() {
        eprintln!("d50: {err:#}");
        std::process::exit(1);
    }
}
