#[macro_export]
macro_rules! timeit {
    // Unnamed expression
    ($code:expr) => {
        $crate::_timeit_internal!("Anonymous code", $code)
    };

    // Unnamed block
    ($code:block) => {
        $crate::_timeit_internal!("Anonymous code", $code)
    };

    // Named expression
    ($name:literal, $code:expr) => {
        $crate::_timeit_internal!($name, $code)
    };

    // Named block
    ($name:literal, $code:block) => {
        $crate::_timeit_internal!($name, $code)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! _timeit_internal {
    ($label:expr, $code:expr) => {{
        let start = std::time::Instant::now();
        let result = $code;
        let duration = start.elapsed();

        log::info!(
            "{} took {}.{:03} seconds",
            $label,
            duration.as_secs(),
            duration.subsec_millis()
        );

        result
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_timeit_returns_value() {
        let value = crate::timeit!("Adding", { 40 + 2 });
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_timeit_in_async_block() {
        let value = crate::timeit!("Awaiting", { async { 7 }.await });
        assert_eq!(value, 7);
    }
}
