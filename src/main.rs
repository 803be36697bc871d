extern crate rcsim;

use clap::Parser;
use rcsim::output::FileOutput;
use rcsim::run_project;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct RcSimArgs {
    #[arg(help = "Path to input JSON file")]
    input_file: String,
    #[arg(
        long,
        short,
        help = "Directory to write results to (defaults to <input>__results next to the input file)"
    )]
    output_dir: Option<PathBuf>,
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
    #[arg(long, default_value_t = false, help = "Log when spans close, with their timings")]
    log_spans: bool,
}

fn main() -> anyhow::Result<()> {
    let args = RcSimArgs::parse();

    // set up basic tracing
    let tracing_subscriber = {
        let mut builder = tracing_subscriber::fmt::fmt().with_max_level(args.log_level);

        if args.log_spans {
            builder = builder.with_span_events(FmtSpan::CLOSE);
        }

        builder.finish()
    };
    tracing::subscriber::set_global_default(tracing_subscriber)
        .expect("setting tracing subscriber failed");

    let input_file = Path::new(args.input_file.as_str());
    let input_file_name = input_file
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("rcsim");
    let output_path = args.output_dir.unwrap_or_else(|| {
        input_file.with_file_name(format!("{input_file_name}__results"))
    });

    let file_output = FileOutput::new(
        output_path.clone(),
        format!("{input_file_name}__{{}}.{{}}"),
    );

    run_project(BufReader::new(File::open(input_file)?), &file_output)?;
    tracing::info!("Results written to {}", output_path.display());

    Ok(())
}
