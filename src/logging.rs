use env_logger::WriteStyle;
use log::LevelFilter;
use std::io::Write;

/// Installs a compact `env_logger` backend for the simulation.
///
/// `RUST_LOG` still overrides the default `info` filter. Returns an error if another
/// logger was already installed, which callers can usually ignore.
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    env_logger::builder()
        .format(|buf, record| writeln!(buf, "[TEX | {}] {}", record.level(), record.args()))
        .write_style(WriteStyle::Always)
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .try_init()
}
