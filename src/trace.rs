//! Structured logging hooks.
//!
//! `entered_span!` opens and enters an info span; `trace_event!` records an
//! info event. Both take `key = value` fields. Without the `tracing` feature
//! the fields are borrowed and discarded, so call sites compile unchanged.

#[cfg(feature = "tracing")]
macro_rules! entered_span {
    ($name:literal $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::span!(tracing::Level::INFO, $name $(, $key = $value)*).entered()
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! entered_span {
    ($name:literal $(, $key:ident = $value:expr)* $(,)?) => {{
        $(let _ = &$value;)*
        $crate::trace::DisabledSpan
    }};
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:literal $(, $key:ident = $value:expr)+ $(,)?) => {
        tracing::event!(name: $name, tracing::Level::INFO, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:literal $(, $key:ident = $value:expr)+ $(,)?) => {{
        $(let _ = &$value;)+
    }};
}

pub(crate) use entered_span;
pub(crate) use trace_event;

/// Guard returned by `entered_span!` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub(crate) struct DisabledSpan;

#[cfg(all(test, not(feature = "tracing")))]
mod tests {
    use std::cell::Cell;

    #[test]
    fn compiled_out_hooks_still_evaluate_fields() {
        let calls = Cell::new(0u32);
        let bump = || {
            calls.set(calls.get() + 1);
            calls.get()
        };
        {
            let _span = entered_span!("unit_span", first = bump());
            trace_event!("unit_event", second = bump(), third = bump());
        }
        assert_eq!(calls.get(), 3);
    }
}
