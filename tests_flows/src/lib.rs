//! # Quiz Flow Integration Tests
//!
//! End-to-end tests that walk full learner flows through the public API:
//! generate -> navigate -> fill -> grade -> correct.
//!
//! ## Test Philosophy
//!
//! - **Whole pipeline**: every flow starts from generated or hand-assembled
//!   problems and ends at a recorded grade
//! - **Event-by-event**: input arrives as discrete clicks, keys, and slash
//!   toggles, exactly as a host would deliver them
//! - **Golden walkthroughs**: the worked examples are pinned verbatim so the
//!   column semantics cannot drift
//!
//! The tests live in `tests/`; this crate exists to anchor them in the
//! workspace.
