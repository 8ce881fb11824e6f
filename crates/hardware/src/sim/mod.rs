/// Simulator owning the clock, TLB and reference collaborators.
pub mod simulator;
/// Memory trace parsing.
pub mod trace;
