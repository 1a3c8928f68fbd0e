use std::fmt;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread;
use std::time::Instant;

use tracing::{error, info, trace};

use crate::error::{ShellError, ShellResult};
use crate::host::{Shell, ShellConfig, WindowBackend, WindowEvent};

/// Work executed on the ui thread with access to the shell.
pub type Task = Box<dyn FnOnce(&mut Shell) + Send>;

/// Creates a bounded queue of deferred tasks.
///
/// The [`Deferrer`] may be cloned and sent to other threads; the [`TaskQueue`]
/// stays with the run loop.
pub fn task_queue(capacity: usize) -> (Deferrer, TaskQueue) {
    let (sender, receiver) = mpsc::sync_channel(capacity);
    (Deferrer { sender }, TaskQueue { receiver, capacity })
}

/// Sending half of a task queue.
#[derive(Clone)]
pub struct Deferrer {
    sender: SyncSender<Task>,
}

impl Deferrer {
    /// Queues `task`, blocking while the queue is full.
    pub fn defer<F>(&self, task: F) -> ShellResult<()>
    where
        F: FnOnce(&mut Shell) + Send + 'static,
    {
        self.sender
            .send(Box::new(task))
            .map_err(|_| ShellError::TaskQueueClosed)
    }

    /// Queues `task` unless the queue is full.
    pub fn try_defer<F>(&self, task: F) -> ShellResult<()>
    where
        F: FnOnce(&mut Shell) + Send + 'static,
    {
        match self.sender.try_send(Box::new(task)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(ShellError::TaskQueueFull),
            Err(TrySendError::Disconnected(_)) => Err(ShellError::TaskQueueClosed),
        }
    }
}

impl fmt::Debug for Deferrer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferrer").finish_non_exhaustive()
    }
}

/// Receiving half of a task queue.
pub struct TaskQueue {
    receiver: Receiver<Task>,
    capacity: usize,
}

impl TaskQueue {
    /// Runs waiting tasks in order, at most one queue's worth per call, and
    /// returns how many ran.
    pub fn run_pending(&self, shell: &mut Shell) -> usize {
        let limit = self.capacity.max(1);
        let mut ran = 0;
        while ran < limit {
            let Ok(task) = self.receiver.try_recv() else {
                break;
            };
            task(shell);
            ran += 1;
        }
        ran
    }
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// Drives `shell` from `window` until the window closes or the shell asks to.
///
/// Each iteration runs deferred tasks, feeds the polled window events to the
/// shell, applies window requests and renders a frame when one is due. The
/// backend is closed before returning, also when it failed.
pub fn run<W>(
    window: &mut W,
    shell: &mut Shell,
    tasks: &TaskQueue,
    config: &ShellConfig,
) -> ShellResult<()>
where
    W: WindowBackend + ?Sized,
{
    info!(title = %config.title, "run loop started");
    let (width, height) = window.size();
    shell.handle(WindowEvent::Resize { width, height });

    let control = shell.control();
    let frame_interval = config.frame_interval();
    let mut last_frame: Option<Instant> = None;
    let mut events = Vec::new();

    let result = loop {
        if window.should_close() || control.close_requested() {
            break Ok(());
        }

        let ran = tasks.run_pending(shell);
        if ran > 0 {
            trace!(tasks = ran, "deferred tasks ran");
        }

        if let Err(err) = window.poll_events(&mut events) {
            break Err(err);
        }
        for event in events.drain(..) {
            shell.handle(event);
        }
        control.apply(window);

        let frame_due = last_frame.is_none_or(|at| at.elapsed() >= frame_interval);
        if frame_due {
            shell.render_frame();
            if let Err(err) = window.present() {
                break Err(err);
            }
            last_frame = Some(Instant::now());
        } else if ran == 0 {
            thread::sleep(config.idle_sleep);
        }
    };

    window.close();
    match &result {
        Ok(()) => info!("run loop stopped"),
        Err(err) => error!(%err, "run loop failed"),
    }
    result
}
