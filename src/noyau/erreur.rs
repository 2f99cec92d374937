// src/noyau/erreur.rs
//
// Erreurs du noyau : une seule enum, toutes locales à un appel d’évaluation.
// Rien n’est jamais “à moitié calculé” : une erreur = aucun résultat.

use thiserror::Error;

/// Raison précise d’un opérateur mal placé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperateurMalPlace {
    /// `*` ou `/` juste après un opérateur ou une `(` (seuls `+`/`-` peuvent y être unaires).
    ApresOperateur,
    /// À l’évaluation : pas assez de valeurs sur la pile pour l’opérateur.
    OperandesManquantes,
}

impl std::fmt::Display for OperateurMalPlace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperateurMalPlace::ApresOperateur => {
                f.write_str("un opérateur ne peut pas suivre un autre opérateur")
            }
            OperateurMalPlace::OperandesManquantes => f.write_str("opérandes insuffisantes"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("l’expression ne peut pas être vide")]
    EmptyExpression,

    #[error("caractère invalide : '{0}'")]
    InvalidCharacter(char),

    #[error("nombre mal formé : '{0}'")]
    MalformedNumber(String),

    #[error("{0}")]
    UnexpectedOperator(OperateurMalPlace),

    #[error("l’expression ne peut pas se terminer par un opérateur")]
    TrailingOperator,

    #[error("parenthèses non appariées")]
    MismatchedParentheses,

    #[error("division par zéro")]
    DivisionByZero,

    #[error("expression mal formée")]
    MalformedExpression,
}

impl CalcError {
    /// Famille “erreur de syntaxe” : tout sauf la division par zéro.
    pub fn is_syntax(&self) -> bool {
        !matches!(self, CalcError::DivisionByZero)
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
