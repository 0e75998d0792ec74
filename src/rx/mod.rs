//! Prescription document assembly.
//!
//! Four parts:
//! 1. Instruction — caregiver sentence per item
//! 2. Grouping — route sections in fixed print order, template placeholders
//! 3. Control — standard / special-control partition
//! 4. Renderer — orchestrates everything into a `PrintDoc`

mod control;
mod grouping;
mod instruction;
mod renderer;

pub use control::*;
pub use grouping::*;
pub use instruction::*;
pub use renderer::*;
