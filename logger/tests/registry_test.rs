//! 전역 기본 로거 테스트
//!
//! 기본 로거는 프로세스 전역이므로 모든 테스트를 직렬로 실행합니다.

use anyhow::Result;
use logger::{Destination, Level, Logger, LoggerConfig, MemoryConsole};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn install_memory(level: Level, include_function: bool) -> Result<MemoryConsole> {
    let console = MemoryConsole::new();
    let config = LoggerConfig {
        level,
        include_function,
        ..Default::default()
    };
    logger::install(Logger::builder(config).console(console.clone()).build()?);
    Ok(console)
}

#[test]
#[serial]
fn test_initialize_with_default_config_is_debug_console() {
    logger::close();
    assert!(!logger::registry::is_installed());

    logger::initialize_with(LoggerConfig::default()).expect("default config");
    let (level, path) = logger::with_default(|l| (l.level(), l.log_path().map(|p| p.to_path_buf())))
        .expect("installed");
    assert_eq!(level, Level::Debug);
    assert_eq!(path, None);
}

#[test]
#[serial]
fn test_package_functions_delegate_to_installed_logger() -> Result<()> {
    let console = install_memory(Level::Info, false)?;

    logger::debugf(format_args!("hidden"));
    logger::infof(format_args!("served {} players", 12));
    logger::warningln(&[&"latency", &"high"]);
    logger::errorln(&[&"room", &7, &"closed"]);
    logger::flush();

    let lines = console.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(" INFO registry_test.rs:"), "{}", lines[0]);
    assert!(lines[0].ends_with("served 12 players"));
    assert!(lines[1].ends_with("latency high"));
    assert!(lines[2].ends_with("room 7 closed"));

    logger::close();
    Ok(())
}

#[test]
#[serial]
fn test_macros_target_default_logger() -> Result<()> {
    let console = install_memory(Level::Debug, true)?;

    let room = 42;
    logger::debugf!("room={room}");
    logger::errorln!("room", room, "gone");
    logger::flush();

    let lines = console.lines();
    assert_eq!(lines.len(), 2);
    assert!(
        lines[0].contains("registry_test::test_macros_target_default_logger room=42"),
        "{}",
        lines[0]
    );
    assert!(lines[1].contains(" ERROR "));
    assert!(lines[1].ends_with("room 42 gone"));

    logger::close();
    Ok(())
}

#[test]
#[serial]
fn test_replacing_default_drains_previous() -> Result<()> {
    let first = install_memory(Level::Debug, false)?;
    for i in 0..300 {
        logger::infoln(&[&"first", &i]);
    }

    let second = install_memory(Level::Debug, false)?;
    logger::infof(format_args!("second"));
    logger::flush();

    assert_eq!(first.lines().len(), 300);
    assert!(first.lines()[299].ends_with("first 299"));
    assert_eq!(second.lines().len(), 1);

    logger::close();
    Ok(())
}

#[test]
#[serial]
fn test_calls_after_close_are_noops() -> Result<()> {
    let console = install_memory(Level::Debug, false)?;
    logger::infof(format_args!("kept"));
    logger::close();

    logger::errorf(format_args!("dropped"));
    logger::errorf!("dropped too");
    logger::flush();

    assert_eq!(console.lines().len(), 1);
    assert!(logger::with_default(|_| ()).is_none());
    Ok(())
}

#[test]
#[serial]
fn test_failed_initialize_keeps_current_logger() -> Result<()> {
    let console = install_memory(Level::Debug, false)?;

    let result = logger::initialize("", Level::Info, Destination::File);
    assert!(result.is_err());

    logger::infof(format_args!("still here"));
    logger::flush();
    assert_eq!(console.lines().len(), 1);

    logger::close();
    Ok(())
}

#[test]
#[serial]
fn test_initialize_with_file_destination() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = LoggerConfig::file("server.log", Level::Warning, Destination::File)
        .with_log_dir(temp_dir.path());
    logger::initialize_with(config)?;

    logger::infof(format_args!("below threshold"));
    logger::warningf(format_args!("disk {}%", 93));
    logger::close();

    let content = fs::read_to_string(temp_dir.path().join("server.log"))?;
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains(" WARNING "));
    assert!(content.trim_end().ends_with("disk 93%"));
    Ok(())
}
