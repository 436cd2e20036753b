//! Motion task body

use crate::commutation::{CommutationEngine, DriveVector};
use crate::traits::{BridgeDriver, ControlLoop, MotionFeedback};

use super::{Task, Telemetry};

/// Control loop tick: sample, control step, commutate
///
/// Owns the commutation engine, so the bridge has a single writer.
pub struct MotionTask<'a, F, C, B>
where
    F: MotionFeedback,
    C: ControlLoop,
    B: BridgeDriver,
{
    feedback: F,
    control: C,
    engine: CommutationEngine<'a, B>,
    telemetry: &'a Telemetry,
    last: DriveVector,
}

impl<'a, F, C, B> MotionTask<'a, F, C, B>
where
    F: MotionFeedback,
    C: ControlLoop,
    B: BridgeDriver,
{
    pub fn new(
        feedback: F,
        control: C,
        engine: CommutationEngine<'a, B>,
        telemetry: &'a Telemetry,
    ) -> Self {
        Self {
            feedback,
            control,
            engine,
            telemetry,
            last: DriveVector::default(),
        }
    }

    pub fn engine(&self) -> &CommutationEngine<'a, B> {
        &self.engine
    }

    /// Engine access for the task's own context (e.g. enable at startup
    /// before the interrupt is armed)
    pub fn engine_mut(&mut self) -> &mut CommutationEngine<'a, B> {
        &mut self.engine
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    /// Output of the most recent tick
    pub fn last_drive(&self) -> &DriveVector {
        &self.last
    }
}

impl<F, C, B> Task for MotionTask<'_, F, C, B>
where
    F: MotionFeedback,
    C: ControlLoop,
    B: BridgeDriver,
{
    fn run(&mut self) {
        self.telemetry.record_motion();
        let sample = self.feedback.sample();
        let command = self.control.process_motion(&sample);
        self.last = self.engine.drive(command, sample.speed);
    }
}
