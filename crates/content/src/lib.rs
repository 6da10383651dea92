//! Content generation for rhythmcard.
//!
//! - [`generator`]: the `BlockGenerator` trait and its registry
//! - [`blocks`]: the nine built-in generators
//! - [`assembler`]: fold blocks into the canonical ten-key page
//! - [`budget`]: per-block and page-level character budgets

pub mod assembler;
pub mod blocks;
pub mod budget;
pub mod generator;

pub use assembler::{AssembledPage, assemble};
pub use blocks::default_registry;
pub use budget::{BlockBudgetResult, BudgetReport, CharBudget};
pub use generator::{BlockGenerator, GenerationInput, GeneratorRegistry};
