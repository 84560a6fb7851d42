//! End-to-end tests for the nano toolchain live in `tests/`.
