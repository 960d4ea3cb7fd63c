//! Controller layer: view state, reducer-like state transitions, UI events, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
pub mod state;
