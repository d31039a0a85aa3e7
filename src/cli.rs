use sola::io::{self, Container};
use sola::stretch::params::DEFAULT_FRAME_SIZE;
use sola::{PcmBuffer, SolaEngine, SolaError, SolaParams, SolaReport};

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    source: String,
    destination: String,
    params: SolaParams,
    /// 0-based channel to read from the source.
    channel: usize,
    json: bool,
    verbose: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().skip(1).any(|a| a == "--version" || a == "-V") {
        println!("{}", version_banner());
        return;
    }

    let options = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(o) => o,
        Err(message) => {
            print_usage();
            eprintln!("ERROR: {}", message);
            std::process::exit(1);
        }
    };

    let default_filter = if options.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let report = match run(&options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    if options.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("ERROR: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", report);
    }
}

fn run(options: &CliOptions) -> Result<SolaReport, SolaError> {
    log::info!("{}", version_banner());
    options.params.validate()?;
    let engine = SolaEngine::from_params(&options.params)?;

    log::info!("reading {}", options.source);
    let data = std::fs::read(&options.source)
        .map_err(|e| SolaError::Io(format!("{}: {}", options.source, e)))?;
    let input = io::read_audio(&data, options.channel)?;
    log::info!(
        "{} samples at {} Hz ({:.2}s)",
        input.len(),
        input.sample_rate,
        input.duration_secs()
    );

    log::info!("performing TSM with {}", options.params);
    let start = std::time::Instant::now();
    let result = engine.run(&input.samples)?;
    log::info!(
        "{} frames in {:.3}s",
        result.frames.len(),
        start.elapsed().as_secs_f64()
    );

    let output = PcmBuffer::new(result.samples, input.sample_rate);
    let container = Container::from_path(&options.destination);
    log::info!("writing {} ({:?})", options.destination, container);
    let bytes = io::encode_audio(container, &output);
    std::fs::write(&options.destination, &bytes)
        .map_err(|e| SolaError::Io(format!("{}: {}", options.destination, e)))?;

    Ok(
        SolaReport::new(
            &engine,
            input.sample_rate,
            input.len(),
            output.len(),
            result.frames.len(),
        )
        .with_file_sizes(data.len(), bytes.len()),
    )
}

/// Parses everything after the program name.
fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut positional: Vec<&str> = Vec::new();
    let mut channel: usize = 1;
    let mut json = false;
    let mut verbose = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--channel" | "-c" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| "--channel requires a value".to_string())?;
                channel = match value.parse::<usize>() {
                    Ok(c) if c >= 1 => c,
                    _ => return Err(format!("Invalid channel: {} (channels start at 1)", value)),
                };
            }
            "--json" => json = true,
            "--verbose" | "-v" => verbose = true,
            other => positional.push(other),
        }
        i += 1;
    }

    if positional.len() < 3 {
        return Err("Required parameters missing".to_string());
    }
    if positional.len() > 4 {
        return Err("Too many parameters".to_string());
    }

    let alpha: f64 = positional[2]
        .parse()
        .map_err(|_| format!("Invalid <alpha>: {}", positional[2]))?;
    let frame_size: usize = match positional.get(3) {
        Some(s) => s
            .parse()
            .map_err(|_| format!("Invalid <framesize>: {}", s))?,
        None => DEFAULT_FRAME_SIZE,
    };

    let params = SolaParams::new(alpha).with_frame_size(frame_size);
    sola::stretch::params::validate_params(&params)?;

    Ok(CliOptions {
        source: positional[0].to_string(),
        destination: positional[1].to_string(),
        params,
        channel: channel - 1,
        json,
        verbose,
    })
}

fn version_banner() -> String {
    format!(
        "{} - v{}. {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    )
}

fn print_usage() {
    eprintln!("Usage: sola <source> <destination> <alpha> [<framesize>] [options]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <source>       .au (8-bit mu-law) or 16-bit PCM .wav file");
    eprintln!("  <destination>  Output file; .wav writes PCM, anything else .au");
    eprintln!("  <alpha>        Time-scale factor, 0.5 to 2.0 (1.5 = 50% longer)");
    eprintln!(
        "  <framesize>    Frame size in samples, 25 to 1000 (default: {})",
        DEFAULT_FRAME_SIZE
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --channel, -c <n>  Source channel to process, from 1 (default: 1)");
    eprintln!("  --json             Print the run report as JSON");
    eprintln!("  --verbose, -v      Log progress (RUST_LOG overrides)");
    eprintln!("  --version, -V      Print the version and exit");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  sola speech.au slow.au 1.5");
    eprintln!("  sola speech.au fast.wav 0.75 200");
    eprintln!("  sola stereo.wav right.au 1.2 --channel 2 --json");
}
