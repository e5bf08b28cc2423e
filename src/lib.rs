//! Boom: a two-player wrap-around arena shooter.
//!
//! The library holds the whole simulation (entities, waves, scoring and the
//! frame loop) and talks to the outside world only through the
//! [`surface::Backend`] trait and the [`score::ScoreStore`] trait.  The binary
//! plugs a crossterm terminal into both.

pub mod compute;
pub mod config;
pub mod entities;
pub mod frame;
pub mod geometry;
pub mod hud;
pub mod score;
pub mod sound;
pub mod sprites;
pub mod surface;
