//! Noyau décimal exact
//!
//! Organisation interne :
//! - erreur.rs   : CalcError (une seule enum, famille syntaxe + division par zéro)
//! - contexte.rs : précision de travail (28 chiffres par défaut)
//! - decimal.rs  : Decimal exact (BigInt × 10^exp) + arrondi demi-pair
//! - jetons.rs   : tokenisation
//! - rpn.rs      : shunting-yard (unaire/binaire via un petit automate)
//! - eval.rs     : pile de valeurs + pipeline complet

pub mod contexte;
pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod rpn;

#[cfg(test)]
mod tests_fuzz_safe;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use contexte::{Contexte, PRECISION_DEFAUT, PRECISION_MAX};
pub use decimal::Decimal;
pub use erreur::{CalcError, OperateurMalPlace, Result};
pub use eval::{
    eval_postfix, eval_postfix_with, evaluate, evaluate_detaille, evaluate_opt, evaluate_with,
    Demarche,
};
pub use jetons::{format_tokens, tokenize, Op, Tok};
pub use rpn::{to_postfix, Precedent};
