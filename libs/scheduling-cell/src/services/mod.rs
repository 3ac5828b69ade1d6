pub mod booking;
pub mod conflict;
pub mod identifier;
pub mod lifecycle;
pub mod slots;
pub mod validate;

pub use booking::SchedulingService;
pub use conflict::ConflictDetector;
pub use lifecycle::LifecycleService;
