//! Command-line front end: reads a grammar file and prints the
//! productions, item sets, FIRST/FOLLOW sets, and the parse table.

#[cfg(feature = "cli")]
mod cli {
    use std::fs;
    use std::io::{self, Write};
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use slrgen::{build_table, first_sets, render};

    /// Generate an SLR(1) parsing table from a grammar file.
    ///
    /// The file holds one production per line, such as `E -> E + T`.
    /// Blank lines and lines starting with `--` are skipped.
    #[derive(Parser, Debug)]
    #[command(version, about)]
    struct Args {
        /// Grammar file to read
        grammar: PathBuf,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Enable debug logging
        #[arg(short, long)]
        debug: bool,
    }

    pub fn main() -> Result<()> {
        let args = Args::parse();
        if args.debug {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Debug)
                .init();
        }

        let text = fs::read_to_string(&args.grammar)
            .with_context(|| format!("reading {}", args.grammar.display()))?;
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("--"))
            .collect();

        let slr = build_table(&lines)?;

        let mut out: Box<dyn Write> = match &args.output {
            Some(path) => Box::new(
                fs::File::create(path)
                    .with_context(|| format!("creating {}", path.display()))?,
            ),
            None => Box::new(io::stdout().lock()),
        };

        render::write_prods(&mut out, &slr.grammar)?;
        writeln!(out)?;
        render::write_states(&mut out, &slr.grammar, &slr.automaton)?;
        let first = first_sets(&slr.grammar)?;
        render::write_fstflw(&mut out, &slr.grammar, "FIRST", &first)?;
        render::write_fstflw(&mut out, &slr.grammar, "FOLLOW", slr.follow.sets())?;
        writeln!(out)?;
        render::write_table(&mut out, &slr)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    cli::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("slrgen was built without the `cli` feature");
}
