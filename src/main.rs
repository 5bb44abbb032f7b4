//! Scene detection driver: replay a recorded pose stream, render stick
//! figures, and raise debounced alerts.

use anyhow::Result;
use clap::Parser;
use log::{debug, info, warn};
use opencv::{core::Vector, highgui, imgcodecs};
use scene_detect::{
    alert::{AlertWorker, LogSink},
    canvas::CanvasPainter,
    config::Config,
    pipeline::FramePipeline,
    replay::ReplayReader,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON-lines pose recording to replay ("-" for stdin)
    #[arg(short, long)]
    input: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Show the stick-figure canvas in a window
    #[arg(short, long)]
    gui: bool,

    /// Directory to record canvas frames as PNG
    #[arg(short, long)]
    record: Option<String>,

    /// Override the configured vote majority (1-3)
    #[arg(long)]
    majority: Option<u8>,

    /// Disable the audible alert worker
    #[arg(long)]
    no_alert: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Scene-Detect starting");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(majority) = args.majority {
        config.classifier.vote_majority = majority;
    }
    if args.no_alert {
        config.alert.enabled = false;
    }
    config.validate()?;

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))?;
    }

    let mut pipeline = if config.alert.enabled {
        FramePipeline::with_alert_worker(&config, AlertWorker::spawn(LogSink))
    } else {
        FramePipeline::new(&config)
    };
    let painter = CanvasPainter::new(config.canvas.size);

    if let Some(dir) = &args.record {
        std::fs::create_dir_all(dir)?;
    }
    if args.gui {
        highgui::named_window("SCENE-DETECT", highgui::WINDOW_NORMAL)?;
    }

    let mut frame_index = 0usize;
    for frame in ReplayReader::open(&args.input)? {
        if stop.load(Ordering::SeqCst) {
            info!("Stop requested, shutting down between frames");
            break;
        }

        let persons = frame?;
        let output = pipeline.process(&persons);
        debug!("frame {}: {}", frame_index, output.scene);

        if args.gui || args.record.is_some() {
            let canvas = painter.paint(&output.primitives)?;

            if let Some(dir) = &args.record {
                let path = Path::new(dir).join(format!("frame_{frame_index:06}.png"));
                imgcodecs::imwrite(
                    path.to_str()
                        .ok_or_else(|| anyhow::anyhow!("Non-UTF8 record path"))?,
                    &canvas,
                    &Vector::new(),
                )?;
            }

            if args.gui {
                highgui::imshow("SCENE-DETECT", &canvas)?;
                let key = highgui::wait_key(1)?;
                if key == 27 || key == i32::from(b'q') {
                    info!("Exit requested by user");
                    break;
                }
            }
        }

        frame_index += 1;
    }

    info!("Processed {} frames", frame_index);
    Ok(())
}
