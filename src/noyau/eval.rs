//! Noyau — évaluation (pipeline réel)
//!
//! texte -> trim -> jetons -> RPN -> pile de valeurs -> Decimal
//!
//! Fonction pure : chaque appel possède ses propres piles, rien n’est partagé.

use log::{debug, trace};

use super::contexte::Contexte;
use super::decimal::Decimal;
use super::erreur::{CalcError, OperateurMalPlace, Result};
use super::jetons::{format_tokens, tokenize, Op, Tok};
use super::rpn::to_postfix;

/// Résultat + trace lisible des étapes (pour l’UI et `--rpn`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub resultat: Decimal,
    pub jetons: String,
    pub rpn: String,
}

/// API publique : évalue une expression à la précision par défaut (28 chiffres).
pub fn evaluate(expr: &str) -> Result<Decimal> {
    evaluate_with(expr, &Contexte::default())
}

/// Variante “entrée absente” : `None` est traité comme une expression vide.
pub fn evaluate_opt(expr: Option<&str>) -> Result<Decimal> {
    evaluate(expr.ok_or(CalcError::EmptyExpression)?)
}

pub fn evaluate_with(expr: &str, ctx: &Contexte) -> Result<Decimal> {
    Ok(evaluate_detaille(expr, ctx)?.resultat)
}

/// Pipeline complet, en gardant la démarche (jetons + RPN).
pub fn evaluate_detaille(expr: &str, ctx: &Contexte) -> Result<Demarche> {
    let s = expr.trim();
    if s.is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    let jetons_txt = format_tokens(&jetons);
    debug!("jetons: {jetons_txt}");

    // 2) RPN
    let rpn = to_postfix(&jetons)?;
    let rpn_txt = format_tokens(&rpn);
    debug!("rpn: {rpn_txt}");

    // 3) Pile de valeurs
    let resultat = eval_postfix_with(&rpn, ctx)?;
    debug!("résultat: {resultat} (précision {})", ctx.precision());

    Ok(Demarche {
        resultat,
        jetons: jetons_txt,
        rpn: rpn_txt,
    })
}

pub fn eval_postfix(rpn: &[Tok]) -> Result<Decimal> {
    eval_postfix_with(rpn, &Contexte::default())
}

/// Réduit une RPN à une seule valeur.
/// - binaire : dépile droite puis gauche, empile `gauche op droite`
/// - unaire  : `+v` laisse la valeur telle quelle, `-v` est ramené au contexte
/// - à la fin : exactement une valeur, sinon expression mal formée
pub fn eval_postfix_with(rpn: &[Tok], ctx: &Contexte) -> Result<Decimal> {
    let mut pile: Vec<Decimal> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Tok::Num(lit) => pile.push(lit.parse::<Decimal>()?),

            Tok::Op(Op::UnaryPlus) => {
                if pile.is_empty() {
                    return Err(operandes_manquantes());
                }
            }
            Tok::Op(Op::UnaryMinus) => {
                let v = pile.pop().ok_or_else(operandes_manquantes)?;
                pile.push((-v).arrondi(ctx));
            }

            Tok::Op(Op::Add) => binaire(&mut pile, Op::Add, |a, b| Ok(a.plus(b, ctx)))?,
            Tok::Op(Op::Sub) => binaire(&mut pile, Op::Sub, |a, b| Ok(a.moins(b, ctx)))?,
            Tok::Op(Op::Mul) => binaire(&mut pile, Op::Mul, |a, b| Ok(a.fois(b, ctx)))?,
            Tok::Op(Op::Div) => binaire(&mut pile, Op::Div, |a, b| {
                a.divise(b, ctx).ok_or(CalcError::DivisionByZero)
            })?,

            Tok::LPar | Tok::RPar => return Err(CalcError::MalformedExpression),
        }
    }

    match (pile.pop(), pile.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(CalcError::MalformedExpression),
    }
}

fn operandes_manquantes() -> CalcError {
    CalcError::UnexpectedOperator(OperateurMalPlace::OperandesManquantes)
}

/// Dépile droite puis gauche, empile `calcul(gauche, droite)`.
fn binaire(
    pile: &mut Vec<Decimal>,
    op: Op,
    calcul: impl FnOnce(&Decimal, &Decimal) -> Result<Decimal>,
) -> Result<()> {
    let b = pile.pop().ok_or_else(operandes_manquantes)?;
    let a = pile.pop().ok_or_else(operandes_manquantes)?;
    let r = calcul(&a, &b)?;
    trace!("{a} {} {b} = {r}", op.symbole());
    pile.push(r);
    Ok(())
}
