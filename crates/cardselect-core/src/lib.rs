#![forbid(unsafe_code)]

//! Core: tick-driven animation primitives for the cardselect control.

pub mod animation;
