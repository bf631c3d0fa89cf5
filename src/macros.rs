/*!
Macro helpers for the binder.

Diagnostics are forwarded to the `log` crate when the `log` feature is enabled,
and always in tests. Otherwise they compile to nothing, so a release build
carries no formatting code for them.

`test_assert!` only does anything in tests or when the `checked` cfg is set,
to catch cursor bugs early without paying for the checks in regular builds.
*/

#[cfg(any(test, feature = "log"))]
macro_rules! diag {
    ($($tokens:tt)*) => {
        log::debug!($($tokens)*)
    };
}

#[cfg(not(any(test, feature = "log")))]
macro_rules! diag {
    ($($tokens:tt)*) => {{
        // keep the arguments type-checked, but never evaluated
        if false {
            let _ = format!($($tokens)*);
        }
    }};
}

macro_rules! test_assert {
    ($($tokens:tt)*) => {{
        #[cfg(any(test, checked))]
        {
            assert!($($tokens)*);
        }
    }};
}
