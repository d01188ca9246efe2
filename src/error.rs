use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;
use thiserror::Error;

/// Programmer errors rejected at `register` time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("Handler id must be a non-empty string")]
    EmptyId,

    #[error("Throttle interval for handler '{id}' must be positive, got {interval:?}")]
    InvalidThrottle { id: String, interval: Duration },
}

/// Failure raised by a consumer while handling a delivered event.
///
/// Never propagates out of the fan-out loop; it is logged with the handler id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Failed(String),

    #[error("Handler panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    pub fn failed(message: impl Into<String>) -> Self {
        HandlerError::Failed(message.into())
    }

    /// Build from a `catch_unwind` payload
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        HandlerError::Panicked(message)
    }
}

/// Result returned by consumer callbacks
pub type HandlerResult = Result<(), HandlerError>;

thread_local! {
    static CONTAINED_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Run a consumer callback, turning a panic into [`HandlerError::Panicked`]
pub(crate) fn catch_handler_panic<R>(f: impl FnOnce() -> R) -> Result<R, HandlerError> {
    CONTAINED_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let result = catch_unwind(AssertUnwindSafe(f));
    CONTAINED_DEPTH.with(|depth| depth.set(depth.get() - 1));
    result.map_err(HandlerError::from_panic)
}

/// True while a consumer callback runs on this thread.
///
/// Panic hooks run before unwinding reaches `catch_unwind`; a hook that tears
/// down process state should leave panics raised here alone.
pub fn panic_is_contained() -> bool {
    CONTAINED_DEPTH.with(|depth| depth.get() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_error_messages() {
        assert_eq!(
            RegisterError::EmptyId.to_string(),
            "Handler id must be a non-empty string"
        );

        let err = RegisterError::InvalidThrottle {
            id: "fade".to_string(),
            interval: Duration::ZERO,
        };
        assert_eq!(
            err.to_string(),
            "Throttle interval for handler 'fade' must be positive, got 0ns"
        );
    }

    #[test]
    fn test_from_panic_str_payload() {
        let err = HandlerError::from_panic(Box::new("boom"));
        assert_eq!(err, HandlerError::Panicked("boom".to_string()));
    }

    #[test]
    fn test_from_panic_string_payload() {
        let err = HandlerError::from_panic(Box::new(String::from("kaboom")));
        assert_eq!(err.to_string(), "Handler panicked: kaboom");
    }

    #[test]
    fn test_panic_contained_only_inside_callback() {
        assert!(!panic_is_contained());
        let inside = catch_handler_panic(panic_is_contained);
        assert_eq!(inside, Ok(true));
        assert!(!panic_is_contained());
    }

    #[test]
    fn test_caught_panic_clears_containment() {
        let result = catch_handler_panic(|| -> u32 { panic!("consumer exploded") });
        assert_eq!(
            result,
            Err(HandlerError::Panicked("consumer exploded".to_string()))
        );
        assert!(!panic_is_contained());
    }

    #[test]
    fn test_nested_callbacks_stay_contained() {
        let result = catch_handler_panic(|| {
            let inner = catch_handler_panic(|| -> u32 { panic!("inner") });
            (inner.is_err(), panic_is_contained())
        });
        assert_eq!(result, Ok((true, true)));
        assert!(!panic_is_contained());
    }

    #[test]
    fn test_from_panic_other_payload() {
        let err = HandlerError::from_panic(Box::new(42_u32));
        assert_eq!(
            err,
            HandlerError::Panicked("non-string panic payload".to_string())
        );
    }
}
