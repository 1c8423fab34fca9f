use {clap::Parser, std::path::PathBuf, std::process::ExitCode};

#[derive(clap::Parser)]
#[command(version, about)]
struct Args {
    /// Midi files to convert. Each one gets a `.lua` file next to it.
    midi_paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match mid2lua::convert_all(&args.midi_paths) {
        0 => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
