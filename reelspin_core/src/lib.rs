pub mod config;
pub mod engine;
pub mod layout;
pub mod paytable;
pub mod reel;
pub mod rng;
pub mod surface;
pub mod symbols;

pub use crate::config::MachineConfig;
pub use crate::engine::{ReelAnimator, TickReport};
pub use crate::layout::Layout;
pub use crate::paytable::{ResultEntry, ResultReporter, ResultTable};
pub use crate::reel::{wrap_decrement, Reel};
pub use crate::rng::PositionSeed;
pub use crate::surface::{DrawCommand, Recorder, Surface};
pub use crate::symbols::{Track, TrackSet, LANES};
pub use reelspin_shared::{Outcome, ReelError, ReelResult, ResultTier};
