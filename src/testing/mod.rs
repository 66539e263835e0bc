//! Testing infrastructure (simulated register file, delays).

pub(crate) mod mock;

pub(crate) use mock::{MockDelay, MockInterface, Op};
