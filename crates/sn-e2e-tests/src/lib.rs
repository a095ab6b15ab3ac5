//! Test-only crate; all content lives under `tests/`.
