use anyhow::Result;
use scatterplot::{Dataset, Plot};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const DATA_PATH: &str = "./data.txt";

fn main() -> Result<()> {
  let subscriber =
    FmtSubscriber::builder().with_max_level(Level::INFO).with_writer(std::io::stderr).finish();
  tracing::subscriber::set_global_default(subscriber)?;

  let data = Dataset::load(DATA_PATH)?;
  tracing::info!(points = data.len(), "loaded {DATA_PATH}");

  let mut plot = Plot::new();
  plot.scatter(data.x(), data.y())?;
  plot.show()?;

  Ok(())
}
