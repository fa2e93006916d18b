//! A single-owner execution context for presentation state.
//!
//! Background work never touches the state directly: it hands a job to the
//! [`MainContext`] and the one [`MainLoop`] owning the state runs it.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

type Job<S> = Box<dyn FnOnce(&mut S) + Send>;

pub struct MainContext<S> {
    sender: UnboundedSender<Job<S>>,
}

impl<S> Clone for MainContext<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("The main loop is no longer running")]
pub struct MainLoopClosed;

impl<S> MainContext<S> {
    pub fn dispatch<F>(&self, job: F) -> Result<(), MainLoopClosed>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.sender.send(Box::new(job)).map_err(|_| MainLoopClosed)
    }
}

pub struct MainLoop<S> {
    receiver: UnboundedReceiver<Job<S>>,
}

impl<S> MainLoop<S> {
    /// Waits for the next job and runs it against `state`.
    /// Returns `false` once every [`MainContext`] has been dropped.
    pub async fn turn(&mut self, state: &mut S) -> bool {
        match self.receiver.recv().await {
            Some(job) => {
                job(state);
                true
            }
            None => false,
        }
    }
}

pub fn main_context<S>() -> (MainContext<S>, MainLoop<S>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (MainContext { sender }, MainLoop { receiver })
}
