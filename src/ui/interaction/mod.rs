//! Mouse interaction: regions registered while rendering, hit-tested on click.

pub mod hit_area;

pub use hit_area::{ClickAction, HitArea, HitAreaRegistry};
