//! Physical constants in natural units (times in seconds, frequencies in Hz).

use std::f64::consts::PI;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Speed of light (m/s).
pub const SPEED_OF_LIGHT_SI: f64 = 299_792_458.0;
/// Reduced Planck constant (eV s).
pub const HBAR_SI: f64 = 6.582_119_514e-16;
/// Gyromagnetic ratio of the NV electron (Hz/T).
pub const ELECTRON_GYROMAGNETIC_SI: f64 = -1.760_859_708e11;
/// Gyromagnetic ratio of C-13 (Hz/T).
pub const C13_GYROMAGNETIC_SI: f64 = 67.282_84e6;
/// Fine structure constant.
pub const FINE_STRUCTURE: f64 = 1.0 / 137.035_999_074;
/// Electron rest energy (eV).
pub const ELECTRON_MASS_EV: f64 = 510_998.928;
/// Electron g-factor.
pub const ELECTRON_G_FACTOR: f64 = 2.002_319_304_361_7;
/// Diamond lattice parameter (unit cell side length) at 300 K, in nanometres.
pub const DIAMOND_LATTICE_NM: f64 = 0.356_68;
/// Natural abundance of C-13.
pub const NATURAL_C13_ABUNDANCE: f64 = 0.0107;

/// Derived constants used by the geometry provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Gyromagnetic ratio of the electron in natural units.
    pub electron_gyromagnetic: f64,
    /// Gyromagnetic ratio of C-13 in natural units.
    pub nuclear_gyromagnetic: f64,
    /// Lattice parameter in natural time units.
    pub lattice_constant: f64,
}

impl PhysicalConstants {
    fn natural() -> Self {
        let unit_charge = (4.0 * PI * FINE_STRUCTURE).sqrt();
        let electron_mass = ELECTRON_MASS_EV / HBAR_SI;
        let electron_gyromagnetic = -unit_charge / (2.0 * electron_mass) * ELECTRON_G_FACTOR;
        let nuclear_gyromagnetic =
            C13_GYROMAGNETIC_SI * electron_gyromagnetic / ELECTRON_GYROMAGNETIC_SI;
        let meter = 1.0 / SPEED_OF_LIGHT_SI;
        let nanometer = 1e-9 * meter;
        let lattice_constant = DIAMOND_LATTICE_NM * nanometer;
        Self {
            electron_gyromagnetic,
            nuclear_gyromagnetic,
            lattice_constant,
        }
    }

    /// Product of the two gyromagnetic ratios.
    pub fn gyromagnetic_product(&self) -> f64 {
        self.electron_gyromagnetic * self.nuclear_gyromagnetic
    }

    /// Dipolar coupling `K` for a displacement measured in lattice units.
    ///
    /// The field at a site displaced by `r` lattice units is
    /// `K / |r|^3 * (axis - 3 (r̂·axis) r̂)`.
    pub fn coupling(&self) -> f64 {
        self.gyromagnetic_product() / (4.0 * PI * self.lattice_constant.powi(3))
    }
}

/// Constants evaluated once per process.
pub static CONSTANTS: Lazy<PhysicalConstants> = Lazy::new(PhysicalConstants::natural);
