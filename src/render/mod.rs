pub mod driver;
pub mod field;
pub mod frame;
pub mod grid;

pub use driver::{
    Animation, CancelToken, DriverState, FrameSink, FrameSnapshot, NoPause, Outcome, Pacer,
    RunReport, Sleeper,
};
pub use field::{Field, FrameStats};
pub use frame::{PlainSink, Strategy, TerminalSink};
pub use grid::Grid;
