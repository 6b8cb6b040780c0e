//! 처음 만들어진 기본 로거 테스트
//!
//! 다른 테스트가 기본 로거를 교체하거나 닫기 전의 상태를 봐야 하므로
//! 별도 테스트 바이너리에 하나만 둡니다.

use logger::{CallerInfo, Destination, Level};

#[test]
fn test_lazy_default_is_debug_console_with_location() {
    let (level, destination, no_file) =
        logger::with_default(|l| (l.level(), l.destination(), l.log_path().is_none()))
            .expect("default logger created on first use");
    assert_eq!(level, Level::Debug);
    assert_eq!(destination, Destination::Console);
    assert!(no_file);

    let expected_line = line!() + 2;
    let line = logger::with_default(|l| {
        l.formatter().format(Level::Debug, Some(CallerInfo::here()), format_args!("ready"))
    })
    .expect("default logger");
    let location = format!(" DEBUG default_logger_test.rs:{} ", expected_line);
    assert!(line.contains(&location), "{}", line);
    assert!(line.ends_with(" ready"), "{}", line);

    logger::debugf(format_args!("default logger ready"));
    logger::flush();
    assert!(logger::registry::is_installed());
}
