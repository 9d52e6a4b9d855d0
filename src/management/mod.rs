mod poller;
mod scheduler;

pub use poller::PlaybackPoller;
pub use poller::PollerPhase;
pub use scheduler::RepeatingTask;
