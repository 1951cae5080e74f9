// src/main.rs

use pathfilter::{cli, logging, output, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("pathfilter error: {err:?}");
        println!("{}", output::error_annotation(&format!("{err:#}")));
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await?;
    Ok(())
}
