//! EduPath Compare — the course comparison workflow.
//!
//! The flow, in dependency order:
//! 1. [`selection`] turns user picks (one course name, 2–3 institute
//!    slugs) into a shareable [`CompareLink`] and decodes incoming
//!    links back into [`CompareParams`].
//! 2. [`resolver`] fetches the matching course rows (with nested
//!    institute fields) for a decoded link.
//! 3. [`gate`] blocks the resolved data behind a one-shot lead
//!    registration; it unlocks only after the registration insert is
//!    accepted.
//! 4. [`table`] projects the resolved rows into the fixed comparison
//!    attribute grid.
//!
//! Everything here is generic over the `edupath-core` repository
//! traits — this crate has no database dependency of its own.

pub mod error;
pub mod gate;
pub mod resolver;
pub mod selection;
pub mod table;

pub use error::{CompareError, FieldError};
pub use gate::{GateState, LeadGate, RegistrationInput};
pub use resolver::{ResolvedComparison, resolve};
pub use selection::{CompareLink, CompareParams, ComparisonSelection};
pub use table::{AttributeRow, ComparisonColumn, ComparisonTable};
