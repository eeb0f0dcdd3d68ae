//! Interactive particle field background.
//!
//! Renders drifting particles on a full-viewport HTML canvas with:
//! - Tiered particle counts by viewport width
//! - Pointer repulsion and a soft glow under the cursor
//! - Proximity links between nearby particles
//! - Click bursts with a capped, oldest-first evicted population
//! - Debounced full rebuild on window resize
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas};
//!
//! view! { <ParticleFieldCanvas config=FieldConfig::default() /> }
//! ```

mod component;
pub mod config;
pub mod debounce;
mod particles;
mod pointer;
mod render;
pub mod surface;
pub mod theme;

pub use component::{CANVAS_ID, ParticleFieldCanvas, ParticleFieldHandle, attach};
pub use config::FieldConfig;
pub use particles::{FrameDirective, Particle, ParticleField};
pub use pointer::{PointerState, repulsion_force};
pub use render::{link_alpha, render};
pub use surface::Surface;
pub use theme::{Color, FieldTheme, Palette};
