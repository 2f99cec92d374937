// src/noyau/rpn.rs
//
// Shunting-yard : jetons infixes -> RPN (postfix)
//
// Règles:
// - '+'/'-' arrivant quand on attend une valeur (début, après opérateur, après '(')
//   => opérateur unaire (u+ / u-), précédence 3, associatif à droite
// - '*'/'/' dans la même position => erreur
// - dépile tant que le sommet est un opérateur de précédence plus forte,
//   ou égale si l’opérateur courant n’est pas associatif à droite

use log::trace;

use super::erreur::{CalcError, OperateurMalPlace, Result};
use super::jetons::{Op, Tok};

/// Classe du jeton précédent : petit automate explicite pour l’unaire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Precedent {
    /// Aussi l’état initial : un signe en tête est unaire.
    #[default]
    Operateur,
    ParOuvrante,
    ParFermante,
    Nombre,
}

impl Precedent {
    /// Vrai si la position exige une valeur (nombre, '(' ou signe unaire).
    pub fn attend_valeur(self) -> bool {
        matches!(self, Precedent::Operateur | Precedent::ParOuvrante)
    }

    /// Interprète un opérateur lu par le tokenizer selon la position.
    pub fn resoudre(self, op: Op) -> Result<Op> {
        if !self.attend_valeur() {
            return Ok(op);
        }
        op.en_unaire().ok_or(CalcError::UnexpectedOperator(
            OperateurMalPlace::ApresOperateur,
        ))
    }

    /// Transition après consommation d’un jeton.
    pub fn apres(self, tok: &Tok) -> Precedent {
        match tok {
            Tok::Num(_) => Precedent::Nombre,
            Tok::Op(_) => Precedent::Operateur,
            Tok::LPar => Precedent::ParOuvrante,
            Tok::RPar => Precedent::ParFermante,
        }
    }
}

fn doit_depiler(sommet: Op, courant: Op) -> bool {
    let (p_sommet, p_courant) = (sommet.precedence(), courant.precedence());
    p_sommet > p_courant || (p_sommet == p_courant && !courant.est_associatif_droite())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Sub, Num(2), Mul, LPar, Num(3), Add, Num(4), RPar]
///   rpn:    [Num(2), UnaryMinus, Num(3), Num(4), Add, Mul]
pub fn to_postfix(tokens: &[Tok]) -> Result<Vec<Tok>> {
    if tokens.is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();
    let mut prev = Precedent::default();

    for tok in tokens {
        match tok {
            Tok::Num(_) => out.push(tok.clone()),

            Tok::LPar => ops.push(Tok::LPar),

            Tok::RPar => loop {
                match ops.pop() {
                    Some(Tok::LPar) => break,
                    Some(top) => out.push(top),
                    None => return Err(CalcError::MismatchedParentheses),
                }
            },

            Tok::Op(lu) => {
                let op = prev.resoudre(*lu)?;

                while let Some(&Tok::Op(sommet)) = ops.last() {
                    if !doit_depiler(sommet, op) {
                        break;
                    }
                    trace!("dépile {}", sommet.symbole());
                    out.push(Tok::Op(sommet));
                    ops.pop();
                }

                ops.push(Tok::Op(op));
            }
        }

        prev = prev.apres(tok);
    }

    if prev.attend_valeur() {
        return Err(CalcError::TrailingOperator);
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        if matches!(top, Tok::LPar) {
            return Err(CalcError::MismatchedParentheses);
        }
        out.push(top);
    }

    Ok(out)
}
