//! 로그 포매터
//!
//! 레벨, 호출 위치, 메시지로부터 한 줄짜리 로그 문자열을 만듭니다.
//! 형식: `YYYY-MM-DD HH:MM:SS LEVEL file.rs:42 crate::func message`

use backtrace::{Backtrace, BacktraceFrame, BacktraceSymbol};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::panic::Location;
use std::str::FromStr;
use std::sync::Arc;

use crate::clock::Clock;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 로그 레벨 열거형
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// 디버깅 정보
    Debug = 0,
    /// 일반 정보
    Info = 1,
    /// 경고 상황
    Warning = 2,
    /// 오류 상황
    Error = 3,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Debug, Level::Info, Level::Warning, Level::Error];

    /// 로그 줄에 찍히는 레벨 태그
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알 수 없는 레벨 문자열
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(pub String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "알 수 없는 로그 레벨: {}", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// 로그 호출 위치
///
/// 파일과 줄 번호는 `#[track_caller]`로 항상 얻습니다. 함수 이름은 매크로
/// 진입점에서 채워지고, 그 밖의 호출은 스택을 풀어서 찾습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerInfo {
    pub file: &'static str,
    pub line: u32,
    pub function: Option<&'static str>,
}

impl CallerInfo {
    pub fn new(file: &'static str, line: u32, function: Option<&'static str>) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line(), None)
    }

    /// `#[track_caller]` 체인 바깥의 첫 호출 위치
    #[track_caller]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    /// 경로를 뺀 파일 이름
    pub fn file_name(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }
}

/// 매크로가 얻은 타입 이름이나 심볼 이름에서 함수 경로만 남김
#[doc(hidden)]
pub fn trim_function_name(name: &str) -> &str {
    let mut name = name.strip_suffix("::__f").unwrap_or(name);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

/// 로그 포매터
pub struct LogFormatter {
    include_file_path: bool,
    include_function: bool,
    caller_depth: usize,
    clock: Arc<dyn Clock>,
}

impl LogFormatter {
    pub fn new(
        include_file_path: bool,
        include_function: bool,
        caller_depth: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            include_file_path,
            include_function,
            caller_depth,
            clock,
        }
    }

    /// 템플릿 메시지 포매팅
    pub fn format(
        &self,
        level: Level,
        caller: Option<CallerInfo>,
        args: fmt::Arguments<'_>,
    ) -> String {
        let mut line = self.prefix(level, caller);
        let _ = line.write_fmt(args);
        line
    }

    /// 값들을 공백 하나로 이어 붙여 포매팅
    pub fn format_concat(
        &self,
        level: Level,
        caller: Option<CallerInfo>,
        values: &[&dyn fmt::Display],
    ) -> String {
        let mut line = self.prefix(level, caller);
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            let _ = write!(line, "{}", value);
        }
        line
    }

    fn prefix(&self, level: Level, caller: Option<CallerInfo>) -> String {
        let mut buf = String::with_capacity(128);
        let _ = write!(
            buf,
            "{} {} ",
            self.clock.now().format(TIMESTAMP_FORMAT),
            level.as_str()
        );

        if let Some(site) = self.resolve_caller(caller) {
            if self.include_file_path {
                let _ = write!(buf, "{}:{} ", site.file_name, site.line);
            }
            if self.include_function {
                if let Some(function) = site.function {
                    buf.push_str(&function);
                    buf.push(' ');
                }
            }
        }

        buf
    }

    fn resolve_caller(&self, caller: Option<CallerInfo>) -> Option<CallSite> {
        let caller = caller?;

        if self.caller_depth > 0 {
            // 스택을 풀지 못하면 위치를 생략한다
            return stack_frame(&caller, self.caller_depth);
        }

        let mut site = CallSite::from(caller);
        if self.include_function && site.function.is_none() {
            site.function = stack_frame(&caller, 0).and_then(|frame| frame.function);
        }
        Some(site)
    }
}

/// 출력할 호출 위치
struct CallSite {
    file_name: Cow<'static, str>,
    line: u32,
    function: Option<Cow<'static, str>>,
}

impl From<CallerInfo> for CallSite {
    fn from(caller: CallerInfo) -> Self {
        Self {
            file_name: Cow::Borrowed(caller.file_name()),
            line: caller.line,
            function: caller.function.map(Cow::Borrowed),
        }
    }
}

/// `caller` 위치의 프레임에서 `depth`만큼 바깥에 있는 프레임
///
/// 디버그 정보가 없거나 스택에서 `caller` 위치를 찾지 못하면 `None`입니다.
fn stack_frame(caller: &CallerInfo, depth: usize) -> Option<CallSite> {
    let backtrace = Backtrace::new();
    let symbols: Vec<&BacktraceSymbol> = backtrace
        .frames()
        .iter()
        .flat_map(BacktraceFrame::symbols)
        .collect();

    let in_caller_file = |symbol: &&BacktraceSymbol| {
        symbol
            .filename()
            .map_or(false, |path| path.ends_with(caller.file))
    };
    // 같은 파일 안의 로거 내부 프레임과 구분하려고 줄 번호를 먼저 맞춘다
    let anchor = symbols
        .iter()
        .position(|symbol| in_caller_file(symbol) && symbol.lineno() == Some(caller.line))
        .or_else(|| symbols.iter().position(in_caller_file))?;

    let symbol = symbols.get(anchor + depth)?;
    let file_name = symbol.filename()?.file_name()?.to_string_lossy().into_owned();
    let line = symbol.lineno()?;
    let function = symbol
        .name()
        .map(|name| trim_function_name(&format!("{:#}", name)).to_string());

    Some(CallSite {
        file_name: Cow::Owned(file_name),
        line,
        function: function.map(Cow::Owned),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::NaiveDate;

    fn fixed_clock() -> Arc<dyn Clock> {
        let at = NaiveDate::from_ymd_opt(2024, 5, 17)
            .and_then(|d| d.and_hms_opt(8, 3, 9))
            .expect("valid timestamp");
        Arc::new(ManualClock::new(at))
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("debug".parse(), Ok(Level::Debug));
        assert_eq!("WARN".parse(), Ok(Level::Warning));
        assert_eq!(" warning ".parse(), Ok(Level::Warning));
        assert_eq!("ERROR".parse(), Ok(Level::Error));
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_format_with_file_path() {
        let formatter = LogFormatter::new(true, false, 0, fixed_clock());
        let caller = CallerInfo::new("src/net/conn.rs", 42, Some("app::net::accept"));

        let line = formatter.format(Level::Info, Some(caller), format_args!("port {}", 8080));
        assert_eq!(line, "2024-05-17 08:03:09 INFO conn.rs:42 port 8080");
    }

    #[test]
    fn test_format_with_function_name() {
        let formatter = LogFormatter::new(true, true, 0, fixed_clock());
        let caller = CallerInfo::new("src/main.rs", 7, Some("app::main"));

        let line = formatter.format(Level::Error, Some(caller), format_args!("boom"));
        assert_eq!(line, "2024-05-17 08:03:09 ERROR main.rs:7 app::main boom");
    }

    #[test]
    fn test_missing_function_name_is_skipped() {
        let formatter = LogFormatter::new(false, true, 0, fixed_clock());
        let caller = CallerInfo::new("src/main.rs", 7, None);

        let line = formatter.format(Level::Debug, Some(caller), format_args!("x"));
        assert_eq!(line, "2024-05-17 08:03:09 DEBUG x");
    }

    #[test]
    fn test_unresolvable_depth_omits_location() {
        let formatter = LogFormatter::new(true, true, 2, fixed_clock());
        let caller = CallerInfo::new("src/main.rs", 7, Some("app::main"));

        let line = formatter.format(Level::Warning, Some(caller), format_args!("disk {}%", 91));
        assert_eq!(line, "2024-05-17 08:03:09 WARNING disk 91%");
    }

    #[test]
    fn test_format_concat() {
        let formatter = LogFormatter::new(false, false, 0, fixed_clock());

        let line = formatter.format_concat(Level::Info, None, &[&"user", &17, &true]);
        assert_eq!(line, "2024-05-17 08:03:09 INFO user 17 true");
    }

    #[test]
    fn test_caller_here_points_at_this_file() {
        let caller = CallerInfo::here();
        assert_eq!(caller.file_name(), "formatter.rs");
        assert!(caller.function.is_none());
    }

    #[test]
    fn test_trim_function_name() {
        assert_eq!(trim_function_name("app::run::__f"), "app::run");
        assert_eq!(trim_function_name("app::run::{{closure}}::__f"), "app::run");
        assert_eq!(trim_function_name("app::run"), "app::run");
    }
}
