use clap::Parser;
use exif_chdate::{run, Args};

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    run(args)?.check()?;
    Ok(())
}
