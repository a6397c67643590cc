//! Operation boundary macros
//!
//! Every top-level export operation (document and page walks, token and
//! style collection) logs one `start` event and exactly one `end` or
//! `end_error` event under the same `op` name. Durations are taken from the
//! `Instant` captured at the start, or passed in as `duration_ms`.
//!
//! Per-component failures inside a page walk do not end the operation; they
//! go through [`log_component_failure!`](crate::log_component_failure) and
//! the walk carries on.

use std::time::Instant;

/// Whole milliseconds since `started`, saturating
#[doc(hidden)]
pub fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Log the start of an operation
///
/// ```
/// # use athena_core::log_op_start;
/// log_op_start!("extract_document");
/// log_op_start!("extract_page_chunked", page_name = "Buttons");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = athena_core_types::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use athena_core::log_op_end;
/// let start = std::time::Instant::now();
/// log_op_end!("collect_styles", started = start, style_count = 3);
/// log_op_end!("extract_document", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, started = $started:expr $(, $($field:tt)*)?) => {
        $crate::log_op_end!(
            $op,
            duration_ms = $crate::logging_facility::macros::elapsed_ms($started)
            $(, $($field)*)?
        )
    };
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = athena_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log the failed end of an operation
///
/// Anything convertible into [`ExError`](crate::errors::ExError) is accepted;
/// its kind, stable code and message become fields of the event.
///
/// ```
/// # use athena_core::{log_op_error, errors::AthenaError};
/// let err = AthenaError::CapabilityMissing { capability: "variables".to_string() };
/// log_op_error!("collect_tokens", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, started = $started:expr $(, $($field:tt)*)?) => {
        $crate::log_op_error!(
            $op,
            $err,
            duration_ms = $crate::logging_facility::macros::elapsed_ms($started)
            $(, $($field)*)?
        )
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = athena_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = %ex_err.message(),
            $($($field)*)?
        );
    }};
}

/// Log a component that could not be described during a page walk
///
/// ```
/// # use athena_core::{log_component_failure, errors::AthenaError};
/// let cause = AthenaError::MissingComponentKey {
///     node_id: "4:2".to_string(),
///     name: "Chip".to_string(),
/// };
/// log_component_failure!("Buttons", "Chip", &cause);
/// ```
#[macro_export]
macro_rules! log_component_failure {
    ($page:expr, $node_name:expr, $cause:expr) => {{
        let cause: &$crate::errors::AthenaError = $cause;
        let ex_err = $crate::errors::ExError::from(cause.clone());
        tracing::warn!(
            component = module_path!(),
            op = "describe_component",
            page_name = %$page,
            node_name = %$node_name,
            err_code = ex_err.code(),
            error = %cause,
            "component skipped"
        );
    }};
}
