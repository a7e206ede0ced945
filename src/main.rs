use std::fs::{self, File};
use std::io::{self, BufReader};
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod models;
mod page;
mod services;
mod utils;

use config::HostConfig;
use models::chart::CHART_ELEMENT_ID;
use models::PageData;
use page::{Document, Frame};
use services::{load_page_data, ChartRenderer};
use utils::ChartError;

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                "stocktrak_chart=info"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            ),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ChartError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = HostConfig::from_env()?.with_args(&args);
    config.validate()?;

    info!("📈 Rendering close price chart ({:?}, {}x{})", config.format, config.width, config.height);

    let data = read_page_data(&config.page_data)?;
    let library = config.library();

    let mut doc = Document::new();
    doc.add_canvas(CHART_ELEMENT_ID, config.width, config.height);
    ChartRenderer::default().install(&mut doc, &data, library.as_ref());
    doc.dispatch_content_loaded()?;

    let frame = doc
        .get_element_by_id(CHART_ELEMENT_ID)
        .and_then(|canvas| canvas.get_context_2d().take_frame());

    match frame {
        Some(frame) => write_frame(&config, &frame),
        None => {
            info!("No chart data on the page, nothing drawn");
            Ok(())
        }
    }
}

fn read_page_data(source: &str) -> Result<PageData, ChartError> {
    if source == "-" {
        load_page_data(io::stdin().lock())
    } else {
        let file = File::open(source)
            .map_err(|e| ChartError::InvalidInput(format!("Failed to open {}: {}", source, e)))?;
        load_page_data(BufReader::new(file))
    }
}

fn write_frame(config: &HostConfig, frame: &Frame) -> Result<(), ChartError> {
    if config.data_uri {
        println!("{}", frame.to_data_uri());
        return Ok(());
    }

    let path = config.output_path();
    fs::write(&path, frame.as_bytes())?;
    info!("✅ Wrote {} ({} bytes)", path.display(), frame.as_bytes().len());
    Ok(())
}
