use std::time::Duration;

/// Settings of the host window and its run loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub title: String,
    /// Upper bound of rendered frames per second. `0.0` renders on every loop
    /// iteration.
    pub frames_per_second: f32,
    /// Number of deferred tasks that may wait before senders block.
    pub task_queue_capacity: usize,
    /// Pause of the run loop after an iteration without tasks.
    pub idle_sleep: Duration,
}

impl ShellConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn frames_per_second(mut self, frames_per_second: f32) -> Self {
        self.frames_per_second = frames_per_second;
        self
    }

    pub fn task_queue_capacity(mut self, capacity: usize) -> Self {
        self.task_queue_capacity = capacity;
        self
    }

    pub fn idle_sleep(mut self, idle_sleep: Duration) -> Self {
        self.idle_sleep = idle_sleep;
        self
    }

    pub fn frame_interval(&self) -> Duration {
        if self.frames_per_second > 0.0 && self.frames_per_second.is_finite() {
            Duration::from_secs_f64(1.0 / f64::from(self.frames_per_second))
        } else {
            Duration::ZERO
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: String::from("areaui"),
            frames_per_second: 60.0,
            task_queue_capacity: 100,
            idle_sleep: Duration::from_millis(1),
        }
    }
}
