use dbgcreatemsgcallback::{args::Args, run};
use tracing::{error, warn};
use vulkan_samples::prelude::SampleError;

fn try_main(args: &Args) -> anyhow::Result<()> {
    let outcome = run(args)?;

    // the layer should have reported the invalid call
    if !outcome.callback_triggered {
        warn!("validation layer did not report the invalid call");
        println!("Message Callback did not get called.");
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse_from_env();
    if let Err(e) = try_main(&args) {
        let code = e.downcast_ref::<SampleError>().map_or(1, SampleError::exit_code);
        error!("{e:?}");
        println!("{e}");
        std::process::exit(code);
    }
}
