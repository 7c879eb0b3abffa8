/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Longest wall-clock delta accepted per frame. Larger deltas (tab
    /// backgrounded, debugger pause) are clamped so a stall never turns
    /// into an unbounded catch-up burst.
    max_frame_time: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;
    pub const DEFAULT_MAX_FRAME_TIME: f32 = 0.25;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            max_frame_time: Self::DEFAULT_MAX_FRAME_TIME,
            accumulator: 0.0,
        }
    }

    pub fn with_max_frame_time(mut self, max_frame_time: f32) -> Self {
        self.max_frame_time = max_frame_time;
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.min(self.max_frame_time);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Fixed-step driver: owns a step closure and converts external frame
/// signals into zero or more simulation steps, each called with exactly
/// the configured `dt`.
///
/// The driver is passive — the host (winit loop, requestAnimationFrame
/// bridge, test harness) calls [`frame`](Self::frame) with the current
/// wall-clock time in seconds. After [`stop`](Self::stop) returns, no
/// further step invocations occur until the next [`start`](Self::start).
pub struct FixedStepDriver<F: FnMut(f32)> {
    step: F,
    timestep: FixedTimestep,
    last_time: Option<f64>,
    running: bool,
}

impl<F: FnMut(f32)> FixedStepDriver<F> {
    pub fn new(dt: f32, step: F) -> Self {
        Self {
            step,
            timestep: FixedTimestep::new(dt),
            last_time: None,
            running: false,
        }
    }

    pub fn with_max_frame_time(mut self, max_frame_time: f32) -> Self {
        self.timestep = self.timestep.with_max_frame_time(max_frame_time);
        self
    }

    /// Begin producing ticks. Idempotent: starting a running driver is a no-op.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_time = None;
        log::debug!("fixed-step driver started (dt = {})", self.timestep.dt());
    }

    /// Halt tick production. Idempotent.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.last_time = None;
        log::debug!("fixed-step driver stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Consume one external frame signal at wall-clock time `now` (seconds).
    /// Runs the step closure once per whole `dt` of accumulated time and
    /// returns how many steps ran. A stopped driver does nothing.
    ///
    /// The first frame after `start()` only establishes the time base.
    pub fn frame(&mut self, now: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let frame_dt = match self.last_time {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now);

        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            (self.step)(self.timestep.dt());
        }
        steps
    }

    /// Interpolation alpha for rendering between ticks.
    pub fn alpha(&self) -> f32 {
        self.timestep.alpha()
    }
}
