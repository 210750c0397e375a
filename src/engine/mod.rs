// ==========================================
// Inventory Planning Engine - Engine Layer
// ==========================================
// Pure computation cores plus the pass orchestrator. Every core is a
// function of its inputs; only the orchestrator touches the clock and
// the id generator.
// ==========================================

pub mod abc;
pub mod actions;
pub mod allocator;
pub mod customer;
pub mod identity;
pub mod lookup;
pub mod movement;
pub mod norms;
pub mod orchestrator;
pub mod velocity;

pub use abc::AbcCore;
pub use actions::ActionCore;
pub use allocator::FifoAllocator;
pub use customer::CustomerCore;
pub use identity::{ItemHandle, ItemIndex};
pub use lookup::LookupIndex;
pub use movement::{MovementCore, MovementFacts};
pub use norms::NormCore;
pub use orchestrator::PlanningEngine;
pub use velocity::{ItemVelocity, VelocityCore};
