// handlers/mod.rs - handlers grouped by what they require of the caller
//
// Public (no identity) → Protected (caller context) → Elevated (app_admin)
pub mod extract;
pub mod public;
pub mod protected;
pub mod elevated;
