use clap::Parser;
use dotenv::dotenv;
use tubesource::{run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();

    if let Err(error) = run(Cli::parse()).await {
        eprintln!("{:#}", error);
        std::process::exit(1);
    }
}
