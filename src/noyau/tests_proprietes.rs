//! Propriétés (proptest) : la RPN calcule la même chose qu’une lecture
//! “à la main” de l’infixe (précédence standard, associativité à gauche).

use proptest::prelude::*;

use super::{evaluate, Contexte, Decimal};

#[derive(Clone, Copy, Debug)]
enum Bin {
    Add,
    Sub,
    Mul,
    Div,
}

impl Bin {
    fn symbole(self) -> &'static str {
        match self {
            Bin::Add => "+",
            Bin::Sub => "-",
            Bin::Mul => "*",
            Bin::Div => "/",
        }
    }
}

fn bin() -> impl Strategy<Value = Bin> {
    prop_oneof![Just(Bin::Add), Just(Bin::Sub), Just(Bin::Mul), Just(Bin::Div)]
}

fn texte(premier: i64, suite: &[(Bin, i64)]) -> String {
    let mut s = premier.to_string();
    for (op, n) in suite {
        s.push_str(&format!(" {} {n}", op.symbole()));
    }
    s
}

/// Lecture de référence : on regroupe les termes multiplicatifs,
/// puis on somme de gauche à droite. Même ordre d’opérations que la RPN.
fn reference(premier: i64, suite: &[(Bin, i64)]) -> Decimal {
    let ctx = Contexte::default();
    let mut termes: Vec<(Bin, Decimal)> = vec![(Bin::Add, Decimal::from(premier))];

    for (op, n) in suite {
        let n = Decimal::from(*n);
        match op {
            Bin::Add | Bin::Sub => termes.push((*op, n)),
            Bin::Mul | Bin::Div => {
                if let Some((_, dernier)) = termes.last_mut() {
                    *dernier = match op {
                        Bin::Mul => dernier.fois(&n, &ctx),
                        _ => dernier
                            .divise(&n, &ctx)
                            .unwrap_or_else(|| panic!("diviseur nul généré")),
                    };
                }
            }
        }
    }

    let mut it = termes.into_iter();
    let mut total = it.next().map(|(_, v)| v).unwrap_or_else(Decimal::zero);
    for (op, v) in it {
        total = match op {
            Bin::Sub => total.moins(&v, &ctx),
            _ => total.plus(&v, &ctx),
        };
    }
    total
}

proptest! {
    #[test]
    fn rpn_equivaut_lecture_standard(
        premier in 0i64..10_000,
        suite in prop::collection::vec((bin(), 1i64..10_000), 0..12),
    ) {
        let s = texte(premier, &suite);
        prop_assert_eq!(evaluate(&s), Ok(reference(premier, &suite)), "expr={}", s);
    }

    #[test]
    fn determinisme(
        premier in 0i64..1_000,
        suite in prop::collection::vec((bin(), 1i64..1_000), 0..8),
    ) {
        let s = texte(premier, &suite);
        prop_assert_eq!(evaluate(&s), evaluate(&s));
    }

    #[test]
    fn entiers_additifs_exacts(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let s = format!("{a} + {b}");
        prop_assert_eq!(evaluate(&s), Ok(Decimal::from(a + b)));
    }

    #[test]
    fn affichage_relu_identique(a in 0i64..100_000, b in 1i64..1_000) {
        let v = evaluate(&format!("{a} / {b}")).unwrap_or_else(|e| panic!("{e}"));
        let relu = v.to_string();
        prop_assert_eq!(evaluate(&relu), Ok(v));
    }
}
