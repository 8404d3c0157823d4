use crate::execution::ExecutionError;
use log::warn;

type UndoStep = Box<dyn FnOnce() -> Result<(), ExecutionError>>;

/// Compensating steps recorded while a multi-step statement runs.
#[derive(Default)]
pub struct UndoLog {
    steps: Vec<(String, UndoStep)>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push<F>(&mut self, desc: String, step: F)
    where
        F: FnOnce() -> Result<(), ExecutionError> + 'static,
    {
        self.steps.push((desc, Box::new(step)));
    }
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    /// Run every step, newest first. A failing step does not stop the
    /// ones before it; its error is handed back.
    pub fn rollback(self) -> Vec<ExecutionError> {
        let mut failures = vec![];
        for (desc, step) in self.steps.into_iter().rev() {
            if let Err(err) = step() {
                warn!("rollback: {} failed: {}", desc, err);
                failures.push(err);
            }
        }
        failures
    }
}

/// Run `f`. If it fails, roll back what it logged and return its error, the
/// errors of the rollback itself are only logged.
pub fn with_undo<T, F>(f: F) -> Result<T, ExecutionError>
where
    F: FnOnce(&mut UndoLog) -> Result<T, ExecutionError>,
{
    let mut undo = UndoLog::new();
    match f(&mut undo) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!("rolling back {} steps after: {}", undo.len(), err);
            undo.rollback();
            Err(err)
        }
    }
}
