//! Angle-to-bridge transform

use crate::angle::ElectricalAngle;
use crate::config::{ConfigError, DriveConfig};
use crate::traits::{BridgeDriver, Demand, DriveCommand, Phase, PhaseState};

use super::{
    DriveFlags, DriveVector, PhaseDrive, PhaseLeadTable, DAC_PHASE_LEAD, PWM_MAX, PWM_SCALER,
    VREF_MAX, VREF_SINE_RATIO,
};

/// Commutation engine for one two-phase motor
///
/// Owned by the motion task, which is the only writer of the bridge. Other
/// contexts influence it only through the shared [`DriveFlags`].
pub struct CommutationEngine<'a, B: BridgeDriver> {
    bridge: B,
    config: DriveConfig,
    flags: &'a DriveFlags,
    phase_lead: PhaseLeadTable,
}

impl<'a, B: BridgeDriver> CommutationEngine<'a, B> {
    /// Create an engine with the board's reference filter lead table
    ///
    /// The bridge is put into the idle state immediately.
    pub fn new(mut bridge: B, config: DriveConfig, flags: &'a DriveFlags) -> Result<Self, ConfigError> {
        config.validate()?;
        bridge.idle();
        Ok(Self {
            bridge,
            config,
            flags,
            phase_lead: DAC_PHASE_LEAD,
        })
    }

    /// Replace the phase lead table (boards with a different reference filter)
    pub fn with_phase_lead(mut self, table: PhaseLeadTable) -> Self {
        self.phase_lead = table;
        self
    }

    /// Swap in new drive parameters, keeping the old ones on error
    pub fn reconfigure(&mut self, config: DriveConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    pub fn flags(&self) -> &'a DriveFlags {
        self.flags
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Give back the bridge driver
    pub fn release(self) -> B {
        self.bridge
    }

    /// Enable or disable the power stage
    ///
    /// Disabling forces the idle output at once instead of waiting for the
    /// next commutation.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.flags.set_enabled(enabled);
        if !enabled {
            self.bridge.idle();
        }
        debug!("bridge enabled: {}", enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.flags.is_enabled()
    }

    /// Current-regulated commutation
    ///
    /// Bridges are held in static directions and the winding currents are
    /// shaped through the reference inputs.
    pub fn drive_current(&mut self, angle: ElectricalAngle, demand_ma: u16, speed: i32) -> DriveVector {
        let angle = self
            .phase_lead
            .compensate(angle, speed, self.config.angle_steps_per_rev);

        if !self.flags.is_enabled() {
            self.bridge.idle();
            return DriveVector::idle(angle);
        }

        let sin = angle.sine();
        let cos = angle.cosine();

        // Load angle of ±90° sets the direction, so no separate sign term
        let vref_mv = self.config.current_to_vref_mv(demand_ma);
        let mcu_vout = self.config.mcu_vout_mv as u32;
        let level = |component: i16| -> u16 {
            (vref_mv * component.unsigned_abs() as u32 / mcu_vout / VREF_SINE_RATIO) as u16
        };
        let reference = [level(sin), level(cos)];
        self.bridge.set_reference(reference[0], reference[1]);

        let state_a = if sin < 0 {
            PhaseState::Reverse
        } else {
            PhaseState::Forward
        };
        let forward_b = if self.config.wiring.is_crossed() {
            cos >= 0
        } else {
            cos < 0
        };
        let state_b = if forward_b {
            PhaseState::Forward
        } else {
            PhaseState::Reverse
        };
        self.bridge.set_phase_state(Phase::A, state_a);
        self.bridge.set_phase_state(Phase::B, state_b);

        DriveVector {
            angle,
            sin,
            cos,
            reference,
            phases: [PhaseDrive::Steady(state_a), PhaseDrive::Steady(state_b)],
        }
    }

    /// Voltage-regulated commutation
    ///
    /// No phase lead is applied here; the reference is held at a flat
    /// ceiling derived from `|demand|` and the bridges are chopped.
    pub fn drive_voltage(&mut self, angle: ElectricalAngle, demand: i16, speed: i32) -> DriveVector {
        if !self.flags.is_enabled() {
            self.bridge.idle();
            return DriveVector::idle(angle);
        }

        let sin = angle.sine();
        let cos = angle.cosine();

        let vref_mv = self.config.current_to_vref_mv(demand.unsigned_abs());
        let ceiling = (vref_mv * VREF_MAX as u32 / self.config.mcu_vout_mv as u32) as u16;
        self.bridge.set_reference(ceiling, ceiling);

        // Resistive drop plus back-EMF feed-forward
        let back_emf = self.config.back_emf_mv_per_rps as i64 * speed as i64
            / self.config.angle_steps_per_rev as i64;
        let vd = demand as i64 * self.config.phase_resistance_ohm as i64 + back_emf;

        let supply = self.config.supply_mv as u64;
        let duty = |component: i16| -> u16 {
            let raw = (component as i64 * vd).unsigned_abs() / supply;
            (raw >> PWM_SCALER).min(PWM_MAX as u64) as u16
        };
        let duty_a = duty(sin);
        let duty_b = duty(cos);

        let quadrant_a = sin < 0;
        let quadrant_b = if self.config.wiring.is_crossed() {
            cos < 0
        } else {
            cos > 0
        };

        let decay = self.flags.decay();
        self.bridge.set_duty_cycle(Phase::A, duty_a, quadrant_a, decay);
        self.bridge.set_duty_cycle(Phase::B, duty_b, quadrant_b, decay);

        DriveVector {
            angle,
            sin,
            cos,
            reference: [ceiling, ceiling],
            phases: [
                PhaseDrive::Chopped {
                    duty: duty_a,
                    quadrant: quadrant_a,
                },
                PhaseDrive::Chopped {
                    duty: duty_b,
                    quadrant: quadrant_b,
                },
            ],
        }
    }

    /// Apply a control step's output
    ///
    /// [`Demand::Idle`] idles the bridges without touching the enable flag.
    pub fn drive(&mut self, command: DriveCommand, speed: i32) -> DriveVector {
        match command.demand {
            Demand::Idle => {
                self.bridge.idle();
                DriveVector::idle(command.angle)
            }
            Demand::Current(ma) => self.drive_current(command.angle, ma, speed),
            Demand::Voltage(v) => self.drive_voltage(command.angle, v, speed),
        }
    }
}
