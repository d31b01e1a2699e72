#![doc = include_str!("../README.md")]

mod chain;
mod engine;
mod fakes;
mod model;
mod pool;
mod strategies;

pub use anyhow;
pub use zhuru_macros::{Fixture, Injectable};

pub use engine::inject_on_fields;
pub use fakes::FakeSeq;
pub use model::{Injectable, Slot, Type};
pub use pool::MockPool;
