//! # learning_packet_gen
//!
//! An offline, deterministic generator of daily learning packets for a small
//! set of children.
//!
//! Every day each child gets a themed bundle of puzzles, riddles and
//! activities. The difficulty of each activity type adapts to how the child
//! did recently, content is never repeated while it is still fresh in the
//! child's memory, and the finished packet is handed to a renderer for
//! printing.
//!
//! ## How it works
//!
//! 1. A [`PacketEngine`] loads the child's [`ChildProfile`] (or enrolls a
//!    roster child on first use).
//! 2. The difficulty adapter looks at the results recorded since each level
//!    last changed and moves levels up or down by the configured thresholds.
//! 3. The selector draws non-recent templates from the [`ContentBank`] at the
//!    new level, falling back to a neighbouring tier when it runs short.
//! 4. The composer orders the activities, stamps the weekday theme and a
//!    teaser for tomorrow, adds the morning password, reflection prompts and
//!    (with siblings on the roster) a team challenge, and returns a
//!    [`Packet`].
//! 5. The packet is archived and the updated profile saved. A failure at any
//!    stage leaves the stored profile untouched.
//!
//! Outcomes flow back through [`PacketEngine::record`] and take effect at the
//! next generation.
//!
//! ## Key features
//!
//! - **Deterministic**: the selection RNG is seeded from `selection.rng_seed`
//!   or from (child, date), so regenerating a day reproduces its packet.
//! - **Configurable**: every threshold lives in [`EngineConfig`], loadable
//!   from TOML.
//! - **Pluggable edges**: profiles persist through [`ProfileStore`], packets
//!   render through [`render::Renderer`].
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use learning_packet_gen::{
//!     ChildConfig, ChildId, ContentBank, EngineConfig, MemoryStore, Outcome, PacketEngine,
//!     render::{MarkdownRenderer, Renderer},
//! };
//!
//! let config = EngineConfig {
//!     children: vec![ChildConfig {
//!         id: ChildId::new("dahlia"),
//!         name: "Dahlia".into(),
//!         starting_levels: Default::default(),
//!         age: Some(8),
//!     }],
//!     ..EngineConfig::default()
//! };
//! let bank = Arc::new(ContentBank::builtin().unwrap());
//! let engine = PacketEngine::new(config, bank, Arc::new(MemoryStore::new())).unwrap();
//!
//! let dahlia = ChildId::new("dahlia");
//! let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
//! let packet = engine.generate(&dahlia, monday).unwrap();
//! println!("{} activities, about {} minutes", packet.activities.len(), packet.total_minutes());
//!
//! // Feed results back; levels move at the next generation.
//! let first = packet.activities[0].id.clone();
//! engine.record(&dahlia, &first, Outcome::Correct, monday).unwrap();
//!
//! let page = MarkdownRenderer.render(&packet, &engine.config().render).unwrap();
//! assert_eq!(page.media_type, "text/markdown");
//! ```

pub mod packet_engine;
pub mod render;

// Convenience re-exports so callers can use `learning_packet_gen::PacketEngine`
// directly without reaching into `packet_engine::`.
pub use packet_engine::{
    ActivityTemplate, ActivityType, BatchReport, ChildConfig, ChildId, ChildProfile,
    Composition, ContentBank, CycleFailure, CycleStage, EngineConfig, EngineError, ErrorKind,
    HistoryRecord, JsonFileStore, Layout, MemoryStore, Outcome, Packet, PacketEngine,
    ProfileStore, RenderConfig, Theme,
};

#[cfg(test)]
mod tests;
