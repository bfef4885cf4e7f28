//! Built-in activity templates, one module per activity type.
//!
//! Every module exposes the same function:
//!
//! ```ignore
//! pub fn templates() -> Vec<ActivityTemplate>
//! ```
//!
//! Each type covers tiers 1–5. [`ContentBank::builtin`](super::bank::ContentBank::builtin)
//! collects them into one bank.

use crate::packet_engine::models::ActivityTemplate;

pub mod creative;
pub mod educational;
pub mod logic_puzzle;
pub mod math;
pub mod riddle;
pub mod word;

pub fn all_templates() -> Vec<ActivityTemplate> {
    let mut all = Vec::new();
    all.extend(logic_puzzle::templates());
    all.extend(math::templates());
    all.extend(word::templates());
    all.extend(educational::templates());
    all.extend(creative::templates());
    all.extend(riddle::templates());
    all
}
