use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = safety_reorg::cli::parse();
    app::run(args)
}
