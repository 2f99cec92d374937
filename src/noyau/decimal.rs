// src/noyau/decimal.rs
//
// Décimal exact à précision de travail fixe.
// valeur = coeff × 10^exp, coeff entier signé (BigInt).
//
// Règles:
// - un littéral est lu EXACTEMENT (aucun arrondi à la construction)
// - + - * / : calcul sur (coeff, exp) seulement, puis arrondi du coeff à
//   `precision` chiffres significatifs (demi-pair)
// - forme normalisée : coeff sans zéros finaux => égalité = égalité numérique
//
// Coût : aucune conversion en texte ni puissance de 10 pleine taille dans
// les opérations ; seul l’écart d’exposants est matérialisé.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, ToPrimitive, Zero};

use super::contexte::Contexte;
use super::erreur::CalcError;

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

fn pow10_u(n: u32) -> BigUint {
    BigUint::from(10u32).pow(n)
}

/// Encadrement (bas, haut) du nombre de chiffres décimaux de `n`, lu sur sa
/// taille en bits : bas <= chiffres < haut.
fn bornes_chiffres(n: &BigUint) -> (u64, u64) {
    let bits = n.bits();
    if bits == 0 {
        return (1, 2);
    }
    let bas = ((bits - 1) as f64 * std::f64::consts::LOG10_2).floor() as u64;
    let haut = (bits as f64 * std::f64::consts::LOG10_2).floor() as u64 + 2;
    (bas.max(1), haut)
}

/// Découpe un littéral `[0-9]*(.[0-9]*)?` en (partie entière, partie fractionnaire).
/// Refuse: deux points ou plus, point seul, caractère non chiffre.
pub(crate) fn decomposer_litteral(s: &str) -> Option<(&str, &str)> {
    let (ent, frac) = s.split_once('.').unwrap_or((s, ""));
    let que_des_chiffres = |p: &str| p.bytes().all(|b| b.is_ascii_digit());

    if !que_des_chiffres(ent) || !que_des_chiffres(frac) {
        return None;
    }
    if ent.is_empty() && frac.is_empty() {
        return None;
    }
    Some((ent, frac))
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    coeff: BigInt,
    exp: i64,
}

impl Decimal {
    pub fn zero() -> Self {
        Self {
            coeff: BigInt::zero(),
            exp: 0,
        }
    }

    /// Retire les zéros finaux. Appelé seulement sur des coeffs déjà ramenés
    /// à la précision (au plus `PRECISION_MAX + 1` chiffres).
    fn normalise(mut coeff: BigInt, mut exp: i64) -> Self {
        if coeff.is_zero() {
            return Self::zero();
        }
        let dix = BigInt::from(10);
        while (&coeff % &dix).is_zero() {
            coeff /= &dix;
            exp += 1;
        }
        Self { coeff, exp }
    }

    pub fn is_zero(&self) -> bool {
        self.coeff.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.coeff.is_negative()
    }

    /// Ramène la valeur à la précision du contexte (no-op si elle y tient déjà).
    pub fn arrondi(&self, ctx: &Contexte) -> Self {
        arrondir(self.coeff.clone(), self.exp, ctx.precision(), false)
    }

    pub fn plus(&self, rhs: &Decimal, ctx: &Contexte) -> Decimal {
        let (a, b, exp) = aligner(self, rhs);
        arrondir(a + b, exp, ctx.precision(), false)
    }

    pub fn moins(&self, rhs: &Decimal, ctx: &Contexte) -> Decimal {
        let (a, b, exp) = aligner(self, rhs);
        arrondir(a - b, exp, ctx.precision(), false)
    }

    pub fn fois(&self, rhs: &Decimal, ctx: &Contexte) -> Decimal {
        arrondir(
            &self.coeff * &rhs.coeff,
            self.exp + rhs.exp,
            ctx.precision(),
            false,
        )
    }

    /// `None` si le diviseur vaut exactement zéro (testé AVANT de diviser).
    pub fn divise(&self, rhs: &Decimal, ctx: &Contexte) -> Option<Decimal> {
        if rhs.is_zero() {
            return None;
        }
        if self.is_zero() {
            return Some(Decimal::zero());
        }
        let precision = ctx.precision();

        // Dividende décalé pour que le quotient entier ait au moins precision + 1 chiffres.
        let (bas_a, _) = bornes_chiffres(self.coeff.magnitude());
        let (_, haut_b) = bornes_chiffres(rhs.coeff.magnitude());
        let decalage = (i64::from(precision) + 1 + haut_b as i64 - bas_a as i64).max(0);

        let dividende = &self.coeff * pow10(decalage as u32);
        let q = &dividende / &rhs.coeff;
        let reste = dividende - &q * &rhs.coeff;

        Some(arrondir(
            q,
            self.exp - rhs.exp - decalage,
            precision,
            !reste.is_zero(),
        ))
    }
}

/// Met deux valeurs au même exposant (le plus petit) : seul le coeff de
/// l’opérande à plus grand exposant est multiplié.
fn aligner(a: &Decimal, b: &Decimal) -> (BigInt, BigInt, i64) {
    match a.exp.cmp(&b.exp) {
        Ordering::Equal => (a.coeff.clone(), b.coeff.clone(), a.exp),
        Ordering::Greater => {
            let ecart = (a.exp - b.exp) as u32;
            (&a.coeff * pow10(ecart), b.coeff.clone(), b.exp)
        }
        Ordering::Less => {
            let ecart = (b.exp - a.exp) as u32;
            (a.coeff.clone(), &b.coeff * pow10(ecart), a.exp)
        }
    }
}

/// coeff × 10^exp -> décimal à `precision` chiffres significatifs, arrondi demi-pair.
///
/// `inexact` : la vraie valeur dépasse strictement |coeff| (reste de division
/// non nul, en dessous du dernier chiffre).
fn arrondir(coeff: BigInt, exp: i64, precision: u32, inexact: bool) -> Decimal {
    let (signe, mag) = coeff.into_parts();
    let limite = pow10_u(precision);

    // 1) gros bloc de chiffres retirés d’un coup (sans dépasser la précision)
    let (bas, _) = bornes_chiffres(&mag);
    let retires = bas.saturating_sub(u64::from(precision));
    let (mut q, mut ordre, mut non_nul) = if retires == 0 {
        (mag, Ordering::Less, inexact)
    } else {
        let diviseur = pow10_u(retires as u32);
        let q = &mag / &diviseur;
        let reste = mag - &q * &diviseur;
        // ordre : partie retirée comparée à une demi-unité du dernier chiffre gardé
        let ordre = match (&reste * 2u32).cmp(&diviseur) {
            Ordering::Equal if inexact => Ordering::Greater,
            o => o,
        };
        (q, ordre, inexact || !reste.is_zero())
    };

    // 2) au plus quelques chiffres restants, un par un
    let mut decalage = retires as i64;
    while q >= limite {
        let chiffre = (&q % 10u32).to_u32().unwrap_or(0);
        q /= 10u32;
        ordre = match chiffre.cmp(&5) {
            Ordering::Equal if non_nul => Ordering::Greater,
            o => o,
        };
        non_nul |= chiffre != 0;
        decalage += 1;
    }

    let impair = !(&q % 2u32).is_zero();
    if ordre == Ordering::Greater || (ordre == Ordering::Equal && impair) {
        q += 1u32;
    }

    Decimal::normalise(BigInt::from_biguint(signe, q), exp + decalage)
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal {
            coeff: -self.coeff,
            exp: self.exp,
        }
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Decimal::normalise(BigInt::from(n), 0)
    }
}

impl FromStr for Decimal {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mal_forme = || CalcError::MalformedNumber(s.to_string());

        let (ent, frac) = decomposer_litteral(s).ok_or_else(mal_forme)?;
        let chiffres = format!("{ent}{frac}");

        // Zéros finaux retirés sur le texte : déjà la forme normalisée.
        let sans_zeros = chiffres.trim_end_matches('0');
        let zeros = (chiffres.len() - sans_zeros.len()) as i64;
        let significatifs = sans_zeros.trim_start_matches('0');
        if significatifs.is_empty() {
            return Ok(Decimal::zero());
        }

        let coeff = BigInt::parse_bytes(significatifs.as_bytes(), 10).ok_or_else(mal_forme)?;
        Ok(Decimal {
            coeff,
            exp: zeros - frac.len() as i64,
        })
    }
}

/// Notation simple, sans exposant, sans zéros finaux ni point pendant.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chiffres = self.coeff.magnitude().to_str_radix(10);
        let signe = if self.is_negative() { "-" } else { "" };

        if self.exp >= 0 {
            chiffres.push_str(&"0".repeat(self.exp as usize));
            return write!(f, "{signe}{chiffres}");
        }

        let k = (-self.exp) as usize;
        if chiffres.len() > k {
            let (ent, frac) = chiffres.split_at(chiffres.len() - k);
            write!(f, "{signe}{ent}.{frac}")
        } else {
            let zeros = "0".repeat(k - chiffres.len());
            write!(f, "{signe}0.{zeros}{chiffres}")
        }
    }
}
