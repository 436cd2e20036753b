//! Reference filter phase lead
//!
//! The reference PWM is smoothed by an RC low-pass, so at speed the winding
//! current lags the commanded angle by `atan(2π·f·R·C)`. The table holds the
//! advance (angle units) that cancels it, one entry per revolution per second.

use crate::angle::ElectricalAngle;

/// Number of speed buckets (rev/s) covered by the table
pub const PHASE_LEAD_MAX_SPEED: usize = 250;

/// Speed-indexed phase advance
#[derive(Debug, Clone, Copy)]
pub struct PhaseLeadTable {
    entries: &'static [u16],
}

impl PhaseLeadTable {
    pub const fn new(entries: &'static [u16]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [u16] {
        self.entries
    }

    /// Highest bucket index
    pub fn max_bucket(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// Speed bucket (whole revolutions per second), saturating at the table end
    pub fn bucket(&self, speed: i32, angle_steps_per_rev: u32) -> usize {
        let rps = speed
            .unsigned_abs()
            .checked_div(angle_steps_per_rev)
            .unwrap_or(0);
        (rps as usize).min(self.max_bucket())
    }

    /// Lead for a bucket, `0` for an empty table
    pub fn lead(&self, bucket: usize) -> u16 {
        self.entries
            .get(bucket.min(self.max_bucket()))
            .copied()
            .unwrap_or(0)
    }

    /// Shift `angle` by the lead for `speed`
    ///
    /// Added for positive speed, subtracted otherwise (including standstill,
    /// where the lead is zero anyway).
    pub fn compensate(
        &self,
        angle: ElectricalAngle,
        speed: i32,
        angle_steps_per_rev: u32,
    ) -> ElectricalAngle {
        let lead = self.lead(self.bucket(speed, angle_steps_per_rev));
        if speed > 0 {
            angle.advance(lead)
        } else {
            angle.retard(lead)
        }
    }

    pub fn is_monotonic(&self) -> bool {
        self.entries.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Lead for the reference RC filter on S42B/S57B boards
pub static DAC_PHASE_LEAD: PhaseLeadTable = PhaseLeadTable::new(&DAC_PHASE_LEAD_ENTRIES);

#[rustfmt::skip]
static DAC_PHASE_LEAD_ENTRIES: [u16; PHASE_LEAD_MAX_SPEED] = [
    0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 49, 54, 58, 63, 67, 72, 76, 80, 84, 87,
    91, 95, 98, 102, 105, 108, 111, 114, 117, 120, 123, 126, 128, 131, 133, 136, 138, 140, 142, 144,
    146, 148, 150, 152, 154, 155, 157, 159, 160, 162, 163, 165, 166, 168, 169, 170, 172, 173, 174, 175,
    176, 177, 178, 180, 181, 182, 183, 183, 184, 185, 186, 187, 188, 189, 190, 190, 191, 192, 193, 193,
    194, 195, 195, 196, 197, 197, 198, 199, 199, 200, 200, 201, 201, 202, 202, 203, 204, 204, 205, 205,
    205, 206, 206, 207, 207, 208, 208, 209, 209, 209, 210, 210, 211, 211, 211, 212, 212, 212, 213, 213,
    213, 214, 214, 214, 215, 215, 215, 216, 216, 216, 217, 217, 217, 217, 218, 218, 218, 218, 219, 219,
    219, 219, 220, 220, 220, 220, 221, 221, 221, 221, 222, 222, 222, 222, 222, 223, 223, 223, 223, 223,
    224, 224, 224, 224, 224, 225, 225, 225, 225, 225, 225, 226, 226, 226, 226, 226, 226, 227, 227, 227,
    227, 227, 227, 228, 228, 228, 228, 228, 228, 228, 229, 229, 229, 229, 229, 229, 229, 229, 230, 230,
    230, 230, 230, 230, 230, 230, 231, 231, 231, 231, 231, 231, 231, 231, 232, 232, 232, 232, 232, 232,
    232, 232, 232, 232, 233, 233, 233, 233, 233, 233, 233, 233, 233, 233, 234, 234, 234, 234, 234, 234,
    234, 234, 234, 234, 234, 235, 235, 235, 235, 235,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ANGLE_STEPS;

    #[test]
    fn test_table_shape() {
        assert_eq!(DAC_PHASE_LEAD.entries().len(), PHASE_LEAD_MAX_SPEED);
        assert_eq!(DAC_PHASE_LEAD.lead(0), 0);
        assert_eq!(DAC_PHASE_LEAD.lead(PHASE_LEAD_MAX_SPEED - 1), 235);
        assert!(DAC_PHASE_LEAD.is_monotonic());
    }

    #[test]
    fn test_bucket_uses_whole_revolutions() {
        let steps = ANGLE_STEPS;
        assert_eq!(DAC_PHASE_LEAD.bucket(0, steps), 0);
        assert_eq!(DAC_PHASE_LEAD.bucket(steps as i32 - 1, steps), 0);
        assert_eq!(DAC_PHASE_LEAD.bucket(steps as i32, steps), 1);
        assert_eq!(DAC_PHASE_LEAD.bucket(-(steps as i32) * 10, steps), 10);
    }

    #[test]
    fn test_bucket_saturates() {
        let steps = ANGLE_STEPS;
        assert_eq!(DAC_PHASE_LEAD.bucket(i32::MAX, steps), 249);
        assert_eq!(DAC_PHASE_LEAD.bucket(i32::MIN, steps), 249);
        assert_eq!(DAC_PHASE_LEAD.lead(10_000), 235);
    }

    #[test]
    fn test_zero_steps_does_not_divide() {
        assert_eq!(DAC_PHASE_LEAD.bucket(123_456, 0), 0);
    }

    #[test]
    fn test_compensate_direction() {
        let steps = ANGLE_STEPS;
        let angle = ElectricalAngle::new(100);
        // 3 rev/s -> lead 15
        let speed = 3 * steps as i32;
        assert_eq!(DAC_PHASE_LEAD.compensate(angle, speed, steps).raw(), 115);
        assert_eq!(DAC_PHASE_LEAD.compensate(angle, -speed, steps).raw(), 85);
        assert_eq!(DAC_PHASE_LEAD.compensate(angle, 0, steps), angle);
    }

    #[test]
    fn test_empty_table() {
        let table = PhaseLeadTable::new(&[]);
        assert_eq!(table.lead(0), 0);
        assert_eq!(table.bucket(1_000_000, 1), 0);
        assert!(table.is_monotonic());
    }
}
