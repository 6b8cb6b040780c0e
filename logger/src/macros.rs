//! 호출 위치를 잡는 로그 매크로
//!
//! `debugf!("x={}", x)`처럼 쓰면 기본 로거로, `debugf!(logger: &log, "x={}", x)`처럼
//! 쓰면 지정한 로거로 기록합니다. 메서드 진입점과 달리 호출 함수 이름까지 채웁니다.

#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __f() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::formatter::trim_function_name(__type_name_of(__f))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __caller {
    () => {
        $crate::CallerInfo::new(
            ::core::file!(),
            ::core::line!(),
            ::core::option::Option::Some($crate::__function_name!()),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_fmt {
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {{
        let __logger: &$crate::Logger = $logger;
        __logger.log_fmt(
            $level,
            ::core::option::Option::Some($crate::__caller!()),
            ::core::format_args!($($arg)+),
        );
    }};
    ($level:expr, $($arg:tt)+) => {{
        let __caller = $crate::__caller!();
        $crate::registry::with_default(|__logger| {
            __logger.log_fmt(
                $level,
                ::core::option::Option::Some(__caller),
                ::core::format_args!($($arg)+),
            )
        });
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_concat {
    (logger: $logger:expr, $level:expr, $($value:expr),+) => {{
        let __logger: &$crate::Logger = $logger;
        __logger.log_concat(
            $level,
            ::core::option::Option::Some($crate::__caller!()),
            &[$(&$value as &dyn ::core::fmt::Display),+],
        );
    }};
    ($level:expr, $($value:expr),+) => {{
        let __caller = $crate::__caller!();
        $crate::registry::with_default(|__logger| {
            __logger.log_concat(
                $level,
                ::core::option::Option::Some(__caller),
                &[$(&$value as &dyn ::core::fmt::Display),+],
            )
        });
    }};
}

/// DEBUG 템플릿 로그
#[macro_export]
macro_rules! debugf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log_fmt!(logger: $logger, $crate::Level::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_fmt!($crate::Level::Debug, $($arg)+)
    };
}

/// INFO 템플릿 로그
#[macro_export]
macro_rules! infof {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log_fmt!(logger: $logger, $crate::Level::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_fmt!($crate::Level::Info, $($arg)+)
    };
}

/// WARNING 템플릿 로그
#[macro_export]
macro_rules! warningf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log_fmt!(logger: $logger, $crate::Level::Warning, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_fmt!($crate::Level::Warning, $($arg)+)
    };
}

/// ERROR 템플릿 로그
#[macro_export]
macro_rules! errorf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__log_fmt!(logger: $logger, $crate::Level::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_fmt!($crate::Level::Error, $($arg)+)
    };
}

/// DEBUG 값 나열 로그
#[macro_export]
macro_rules! debugln {
    (logger: $logger:expr, $($value:expr),+ $(,)?) => {
        $crate::__log_concat!(logger: $logger, $crate::Level::Debug, $($value),+)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::__log_concat!($crate::Level::Debug, $($value),+)
    };
}

/// INFO 값 나열 로그
#[macro_export]
macro_rules! infoln {
    (logger: $logger:expr, $($value:expr),+ $(,)?) => {
        $crate::__log_concat!(logger: $logger, $crate::Level::Info, $($value),+)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::__log_concat!($crate::Level::Info, $($value),+)
    };
}

/// WARNING 값 나열 로그
#[macro_export]
macro_rules! warningln {
    (logger: $logger:expr, $($value:expr),+ $(,)?) => {
        $crate::__log_concat!(logger: $logger, $crate::Level::Warning, $($value),+)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::__log_concat!($crate::Level::Warning, $($value),+)
    };
}

/// ERROR 값 나열 로그
#[macro_export]
macro_rules! errorln {
    (logger: $logger:expr, $($value:expr),+ $(,)?) => {
        $crate::__log_concat!(logger: $logger, $crate::Level::Error, $($value),+)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::__log_concat!($crate::Level::Error, $($value),+)
    };
}
