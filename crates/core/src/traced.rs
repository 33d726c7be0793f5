// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured tracing surface for effects.

/// Name/fields view of an effect, consumed by the executor's tracing spans.
pub trait TracedEffect {
    /// Short stable name ("set_timer", "notify", ...)
    fn name(&self) -> &'static str;

    /// Key/value pairs worth logging for this effect.
    fn fields(&self) -> Vec<(&'static str, String)>;
}
