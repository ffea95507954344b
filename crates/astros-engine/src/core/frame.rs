/// Lifecycle of the repeating per-frame callback.
///
/// `start` hands out a [`FrameHandle`]; `stop` consumes it. The handle is
/// neither `Clone` nor `Copy`, so one run can be stopped at most once, and a
/// handle from an earlier run cannot stop a later one.
#[derive(Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
    /// Generation of the current (or last) run.
    generation: u64,
    /// Frames driven in the current run.
    frames: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoopState {
    #[default]
    Idle,
    Running,
}

/// Proof of a running frame loop, required to stop it.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the handle leaves no way to stop the frame loop"]
pub struct FrameHandle {
    generation: u64,
}

impl FrameHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a run. Returns `None` if a run is already in progress.
    pub fn start(&mut self) -> Option<FrameHandle> {
        if self.state == LoopState::Running {
            return None;
        }
        self.generation += 1;
        self.frames = 0;
        self.state = LoopState::Running;
        Some(FrameHandle { generation: self.generation })
    }

    /// End the run `handle` belongs to. Returns `false` for a stale handle,
    /// which leaves the current run untouched.
    pub fn stop(&mut self, handle: FrameHandle) -> bool {
        if self.state != LoopState::Running || handle.generation != self.generation {
            log::warn!(
                "frame loop: ignoring stale handle (gen {}, current {})",
                handle.generation,
                self.generation
            );
            return false;
        }
        self.state = LoopState::Idle;
        true
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Account for one frame. Returns `false` when no run is active and the
    /// frame must be skipped.
    pub fn begin_frame(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.frames += 1;
        true
    }

    /// Frames driven in the current (or last) run.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
