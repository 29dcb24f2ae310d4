use clap::Parser;
use snipol::{
    cli::{Args, PolicyLoader},
    error::SnipolError,
    render::{DirectorySink, StdoutSink, publish},
};

#[tokio::main]
async fn main() -> Result<(), SnipolError> {
    env_logger::init();

    let args = Args::parse();

    let plan = PolicyLoader::load(&args)?;
    if args.check {
        log::info!("{} policies are valid", plan.policies.len());
        return Ok(());
    }

    let artifacts = plan.render()?;
    match args.output.as_ref() {
        Some(dir) => publish(&DirectorySink::new(dir), &artifacts).await?,
        None => publish(&StdoutSink, &artifacts).await?,
    };

    Ok(())
}
