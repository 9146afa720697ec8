// Virtual input synthesis: cursor model, natural/relax processors,
// judgement-source seam, KPS telemetry

mod cursor;
mod judgement;
mod kps;
mod natural;
mod relax;

pub use cursor::{CursorButton, VirtualCursor};
pub use judgement::{ActiveObjectState, JudgementSource};
pub use kps::KpsCounter;
pub use natural::NaturalInputProcessor;
pub use relax::RelaxInputProcessor;
