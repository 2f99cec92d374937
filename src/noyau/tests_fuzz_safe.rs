//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées : seule la division par zéro est une erreur acceptable
//! - invariant clé : (e) et e donnent le même résultat

use std::time::{Duration, Instant};

use super::{evaluate, CalcError, Decimal};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // inclut 0 (utile pour provoquer des divisions par zéro)
    let ent = rng.pick(20);
    match rng.pick(4) {
        0 => format!("{ent}.{}", rng.pick(100)),
        1 => format!(".{}", 1 + rng.pick(9)),
        _ => format!("{ent}"),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(7) {
        0 => gen_nombre(rng),
        1 => format!("-{a}"),
        2 => format!("+({a})"),
        _ => {
            let op = ["+", "-", "*", "/"][rng.pick(4) as usize];
            let b = gen_expr(rng, depth - 1);
            if rng.coin() {
                format!("({a} {op} {b})")
            } else {
                format!("{a} {op} {b}")
            }
        }
    }
}

/// Chaîne arbitraire sur l’alphabet supporté + quelques intrus.
fn gen_bruit(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '2', '9', '.', '+', '-', '*', '/', '(', ')', ' ', ' ', 'x', '^', ',',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5);

        match evaluate(&expr) {
            Ok(v) => {
                assert_eq!(evaluate(&expr), Ok(v.clone()), "expr={expr:?}");
                assert_eq!(evaluate(&format!("({expr})")), Ok(v), "expr={expr:?}");
                seen_ok += 1;
            }
            Err(e) => {
                // Bien formée : seule la division par zéro est normale.
                assert_eq!(e, CalcError::DivisionByZero, "expr={expr:?}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 40, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_negation() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        if let Ok(v) = evaluate(&expr) {
            assert_eq!(evaluate(&format!("-({expr})")), Ok(-v), "expr={expr:?}");
        }
    }
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..500 {
        budget(t0, max);

        let len = 1 + rng.pick(24) as usize;
        let s = gen_bruit(&mut rng, len);

        // Aucun panic ; le verdict est stable.
        let r1 = evaluate(&s);
        let r2 = evaluate(&s);
        assert_eq!(r1, r2, "s={s:?}");

        if s.contains(|c: char| matches!(c, 'x' | '^' | ',')) {
            assert!(r1.is_err(), "intrus accepté: s={s:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    // 800 × 0.5 = 400
    assert_eq!(evaluate(&expr), Ok(Decimal::from(400)));
}

#[test]
fn fuzz_safe_imbrication_profonde_sans_recursion() {
    let n = 5_000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(evaluate(&expr), Ok(Decimal::from(1)));

    let signes = format!("{}7", "-".repeat(1_001));
    assert_eq!(evaluate(&signes), Ok(Decimal::from(-7)));
}

#[test]
fn fuzz_safe_longue_chaine_decimale() {
    let expr = vec!["0.1"; 1_000].join(" + ");
    assert_eq!(evaluate(&expr), Ok(Decimal::from(100)));
}

#[test]
fn fuzz_safe_temps_quand_la_taille_double() {
    // Même budget à chaque doublement de taille.
    let max = Duration::from_millis(500);

    for k in [20_000usize, 40_000, 80_000] {
        let expr = format!("1{}", "0".repeat(k));
        let t0 = Instant::now();
        let v = evaluate(&expr);
        budget(t0, max);
        assert_eq!(v.map(|v| v.to_string()), Ok(expr), "k={k}");
    }

    let litteral = format!("1{}", "0".repeat(500));
    for m in [50usize, 100, 200] {
        let expr = vec![litteral.as_str(); m].join(" * ");
        let t0 = Instant::now();
        let v = evaluate(&expr);
        budget(t0, max);
        let attendu = format!("1{}", "0".repeat(500 * m));
        assert_eq!(v.map(|v| v.to_string()), Ok(attendu), "m={m}");
    }
}
