//! Named screen states keyed off the window width.
//!
//! Each state claims a half-open width interval `[min, max)`; the largest
//! state leaves `max` open. Registration rejects overlapping intervals, so
//! exactly one state matches any width once the set is gap-free. A width
//! that matches nothing is a configuration error and surfaces as `Err`
//! rather than silently leaving no state active.

type Hook = Box<dyn FnMut()>;

/// One screen state and its transition hooks.
pub struct StateDef {
    id: &'static str,
    min_width: u32,
    /// Exclusive upper bound; `None` = open-ended.
    max_width: Option<u32>,
    on_enter: Hook,
    on_leave: Hook,
}

impl StateDef {
    pub fn new(id: &'static str, min_width: u32, max_width: Option<u32>) -> Self {
        Self {
            id,
            min_width,
            max_width,
            on_enter: Box::new(|| {}),
            on_leave: Box::new(|| {}),
        }
    }

    pub fn on_enter(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_enter = Box::new(hook);
        self
    }

    pub fn on_leave(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_leave = Box::new(hook);
        self
    }

    fn contains(&self, width: u32) -> bool {
        width >= self.min_width && self.max_width.map_or(true, |max| width < max)
    }

    fn overlaps(&self, other: &StateDef) -> bool {
        let self_end = self.max_width.unwrap_or(u32::MAX);
        let other_end = other.max_width.unwrap_or(u32::MAX);
        self.min_width < other_end && other.min_width < self_end
    }
}

#[derive(Default)]
pub struct BreakpointManager {
    states: Vec<StateDef>,
    active: Option<usize>,
}

impl BreakpointManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a screen state. Ids must be unique and intervals must not overlap
    /// with anything already registered.
    pub fn register(&mut self, state: StateDef) -> Result<(), String> {
        if let Some(existing) = self.states.iter().find(|s| s.id == state.id) {
            return Err(format!("screen state '{}' registered twice", existing.id));
        }
        if let Some(existing) = self.states.iter().find(|s| s.overlaps(&state)) {
            return Err(format!(
                "screen state '{}' overlaps '{}'",
                state.id, existing.id
            ));
        }
        self.states.push(state);
        Ok(())
    }

    /// Id of the currently active state, if an evaluation has run.
    pub fn active(&self) -> Option<&'static str> {
        self.active.map(|i| self.states[i].id)
    }

    /// Select the state covering `width` and fire the leave/enter pair if the
    /// active state changed. Evaluating the same width twice is a no-op; a
    /// jump across several boundaries still fires exactly one pair (only the
    /// old and new states matter).
    pub fn evaluate(&mut self, width: u32) -> Result<(), String> {
        let next = self
            .states
            .iter()
            .position(|s| s.contains(width))
            .ok_or_else(|| format!("no screen state covers width {width}px"))?;

        if self.active == Some(next) {
            return Ok(());
        }

        let previous = self.active;
        self.active = Some(next);
        if let Some(prev) = previous {
            (self.states[prev].on_leave)();
        }
        (self.states[next].on_enter)();
        Ok(())
    }

    /// Initial evaluation, before resize events start flowing. Fires only the
    /// entered state's hook since there is nothing to leave.
    pub fn start(&mut self, width: u32) -> Result<(), String> {
        self.evaluate(width)
    }
}
