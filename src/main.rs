// elos-task - command-line client for the elos data service
use elos_task::cli::{run, Args, ConsoleWriter, OutputWriter};

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    let writer = ConsoleWriter::new(args.output.clone());

    if let Err(e) = run(args, &writer).await {
        if writer.write_error(&e.to_string()).is_err() {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
