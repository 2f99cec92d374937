//! Calculatrice décimale — noyau d’évaluation exact.
//!
//! `evaluate("0.1 + 0.2")` vaut exactement `0.3` : tout le calcul se fait en
//! décimal à précision fixe (28 chiffres significatifs par défaut), jamais en
//! flottant binaire.

pub mod noyau;

pub use noyau::{
    evaluate, evaluate_detaille, evaluate_opt, evaluate_with, CalcError, Contexte, Decimal,
    Demarche,
};
