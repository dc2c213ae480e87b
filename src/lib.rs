pub mod discretization;
pub mod numerics;
pub mod physics;
pub mod processing;
