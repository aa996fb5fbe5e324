//! Stdout logger: `<local time> [<LEVEL>] <message>`.

use chrono::{DateTime, Local};
use log::Level;
use std::fmt::Display;
use std::io::Write;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_line(at: DateTime<Local>, level: Level, message: impl Display) -> String {
    format!("{} [{}] {}", at.format(TIMESTAMP_FORMAT), level, message)
}

/// Install the global logger. `RUST_LOG` overrides the default `debug` filter.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}",
                format_line(Local::now(), record.level(), record.args())
            )
        })
        .target(env_logger::Target::Stdout)
        .init();
}
