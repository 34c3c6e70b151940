pub mod range;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs the elapsed time at the given level (default is debug),
/// and evaluates to the value of the expression.
#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} µs", $label, elapsed.as_micros());
        value
    }};
}

/// Re-implementation of the above macro for wasm, where `Instant` isn't
/// available. Timing goes through the browser console instead.
#[cfg(all(target_arch = "wasm32", feature = "js"))]
#[doc(hidden)]
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        // log level does nothing on the wasm version
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        use web_sys::console;

        let _ = $log_level;
        // https://developer.mozilla.org/en-US/docs/Web/API/console/time
        console::time_with_label($label);
        let value = $ex;
        console::time_end_with_label($label);
        value
    }};
}

/// Wasm without the browser bindings has no clock to time with, so the
/// expression is just evaluated.
#[cfg(all(target_arch = "wasm32", not(feature = "js")))]
#[doc(hidden)]
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let _ = ($label, $log_level);
        $ex
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_timed_evaluates_expression() {
        let mut calls = 0;
        let value = timed!("Counting", {
            calls += 1;
            calls * 2
        });
        assert_eq!(value, 2);
        assert_eq!(calls, 1);
        assert_eq!(timed!("Tracing", log::Level::Trace, "done"), "done");
    }
}
