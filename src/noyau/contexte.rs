// src/noyau/contexte.rs
//
// Contexte d’arithmétique : précision de travail (chiffres significatifs).
// Garde-fou : la précision est bornée (anti-abus / anti-gel).

use log::warn;

/// Précision de travail par défaut (chiffres significatifs).
pub const PRECISION_DEFAUT: u32 = 28;

/// Borne haute de la précision.
pub const PRECISION_MAX: u32 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contexte {
    precision: u32,
}

impl Default for Contexte {
    fn default() -> Self {
        Self {
            precision: PRECISION_DEFAUT,
        }
    }
}

impl Contexte {
    /// Construit un contexte ; la précision est ramenée dans `1..=PRECISION_MAX`.
    pub fn avec_precision(precision: u32) -> Self {
        let bornee = precision.clamp(1, PRECISION_MAX);
        if bornee != precision {
            warn!("précision {precision} hors bornes, ramenée à {bornee}");
        }
        Self { precision: bornee }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }
}
