mod app;
mod fonts;
mod painter;

use yourtime_engine::logging::{init_logging, LoggingConfig};

use crate::app::ClockApp;

fn main() {
    init_logging(LoggingConfig::default());

    let result = ClockApp::new()
        .title("In Your Own Time")
        .size(400.0, 760.0)
        .run();

    if let Err(e) = result {
        log::error!("yourtime: {e:#}");
        std::process::exit(1);
    }
}
