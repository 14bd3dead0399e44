//! Wand position values and stock landmarks

/// Lowest allowed position
pub const WAND_LOWEST: i16 = 55;
/// Highest allowed position
pub const WAND_HIGHEST: i16 = 180;
/// Position applied at boot
pub const WAND_START: i16 = 150;
/// Toy resting on the floor
pub const WAND_TOY_ON_GROUND: i16 = 88;
/// Toy lifted just clear of the floor
pub const WAND_TOY_OFF_GROUND: i16 = 92;

/// Last position written to the servo, in device units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WandPosition(i16);

impl WandPosition {
    pub const fn new(value: i16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i16 {
        self.0
    }
}

impl From<WandPosition> for i16 {
    fn from(position: WandPosition) -> Self {
        position.0
    }
}
