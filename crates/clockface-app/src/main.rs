use std::{backtrace::Backtrace, num::NonZeroUsize, panic, path::PathBuf, process, sync::Arc};

use clap::Parser;
use clockface_core::{adapters::system_clock::SystemClock, config::get_config, event_bus::EventBus};
use clockface_gui::{App, get_log_spec};
use clockface_proto::ports::clock::ClockSource;
use flexi_logger::{
    Age, Cleanup, Criterion, Duplicate, FileSpec, LogSpecBuilder, Logger, LoggerHandle, Naming,
};
use log::{debug, error, info, warn};
use masterror::{AppError, AppResult};
use tokio::runtime::Handle;

const BUS_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    config_path: Option<PathBuf>,
}

fn start_logger() -> AppResult<LoggerHandle> {
    let logger = Logger::with(
        LogSpecBuilder::new()
            .default(log::LevelFilter::Info)
            .build(),
    )
    .log_to_file(FileSpec::default().directory("/tmp/clockface"))
    .rotate(
        Criterion::Age(Age::Day),
        Naming::Timestamps,
        Cleanup::KeepLogFiles(7),
    );
    let logger = if cfg!(debug_assertions) {
        logger.duplicate_to_stdout(Duplicate::All)
    } else {
        logger
    };

    logger
        .start()
        .map_err(|err| AppError::internal(format!("Failed to start logger: {err}")))
}

#[tokio::main]
async fn main() -> iced::Result {
    let args = Args::parse();

    let logger = start_logger().unwrap_or_else(|err| {
        eprintln!("{err}");
        process::exit(1);
    });
    debug!("args: {args:?}");

    panic::set_hook(Box::new(|info| {
        let b = Backtrace::capture();
        error!("Panic: {info} \n {b}");
    }));

    let (config, config_path) = get_config(args.config_path)
        .map_err(AppError::from)
        .unwrap_or_else(|err| {
            error!("Failed to read config: {err}");
            process::exit(1);
        });
    info!("Using config {config_path:?}");

    match get_log_spec(&config.log_level) {
        Ok(spec) => {
            logger.set_new_spec(spec);
        }
        Err(err) => warn!("Ignoring log level {:?}: {err}", config.log_level),
    }

    let bus = EventBus::new(BUS_CAPACITY);
    let clock_source: Arc<dyn ClockSource> = Arc::new(SystemClock);

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .exit_on_close_request(false)
        .run_with(App::new((
            logger,
            config,
            clock_source,
            bus.sender(),
            Handle::current(),
            bus.receiver(),
        )))
}
