pub mod clustering;
pub mod error;
pub mod hull;
pub mod limits;
pub mod orchestrator;
pub mod routing;
pub mod spatial;
pub mod workers;

/// decimal places retained on every `Point` coordinate and derived distance.
///
/// Baked in as a crate-wide constant (rather than a field on `Limits`)
/// because it participates in `Point`'s `Eq`/`Hash`/`Ord` contracts: varying
/// it per call would mean two `Point`s could compare equal under one config
/// and distinct under another, which a spatial key type must not allow.
pub const PRECISION: u32 = 6;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// progress bar, shown during K-Means refinement and orchestrator fan-out
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_millis(200);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan} {pos}/{len}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let progress = indicatif::ProgressBar::new(n as u64);
    progress.set_style(style);
    progress.enable_steady_tick(tick);
    progress
}

/// initialize combined terminal + file logging
pub fn init() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
