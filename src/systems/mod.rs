mod capacity;
mod climate;
mod lifecycle;
mod nomad;
mod pollination;

pub use capacity::CapacitySystem;
pub use climate::ClimateSystem;
pub use lifecycle::LifecycleSystem;
pub use nomad::NomadSystem;
pub use pollination::PollinationSystem;
