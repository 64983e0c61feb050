//! Rule builders and construction errors.

pub mod builders;
pub mod error;

pub use builders::{
    Block, Chord, DoubleTapLatch, LatchOn, Momentary, PassThrough, Remap, RuleFactory, SetFlags,
    StickyToggle, TapHold, TapToggle,
};
pub use error::{RuleError, RuleResult};
