//! Interrupt task scheduler
//!
//! Two hardware timers pace the firmware:
//!
//! - **motion** (default 250 µs, highest priority) runs the control loop and
//!   the commutation engine
//! - **service** (10 ms, lower priority) transmits status and watches the
//!   communication link
//!
//! Each timer interrupt calls [`TaskDescriptor::on_interrupt`], which runs
//! the task body and then measures how long it took from the timer counter.
//! An update flag raised again during the body means the task overran its
//! period.

mod dispatch;
mod motion;
mod service;
mod task;
mod telemetry;

pub use dispatch::Scheduler;
pub use motion::MotionTask;
pub use service::ServiceTask;
pub use task::{Task, TaskDescriptor, TaskDiagnostics, TaskKind, TaskSample, TaskState};
pub use telemetry::Telemetry;
