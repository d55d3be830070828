mod engine;
mod invoice;

pub use engine::LifecycleEngine;
