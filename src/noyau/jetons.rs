// src/noyau/jetons.rs

use super::decimal::decomposer_litteral;
use super::erreur::{CalcError, Result};

/// Opérateurs reconnus (binaires + unaires).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    UnaryPlus,
    UnaryMinus,
}

impl Op {
    pub fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
            Op::UnaryPlus | Op::UnaryMinus => 3,
        }
    }

    pub fn est_unaire(self) -> bool {
        matches!(self, Op::UnaryPlus | Op::UnaryMinus)
    }

    /// Les unaires sont associatifs à droite (pour le dépilement) : `- - 3`.
    pub fn est_associatif_droite(self) -> bool {
        self.est_unaire()
    }

    /// Forme unaire d’un `+`/`-` ; `None` pour `*`/`/` (jamais unaires).
    pub fn en_unaire(self) -> Option<Op> {
        match self {
            Op::Add | Op::UnaryPlus => Some(Op::UnaryPlus),
            Op::Sub | Op::UnaryMinus => Some(Op::UnaryMinus),
            Op::Mul | Op::Div => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::UnaryPlus => "u+",
            Op::UnaryMinus => "u-",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    /// Littéral tel quel (texte) : la conversion exacte se fait à l’évaluation.
    Num(String),
    Op(Op),
    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux : `12`, `1.5`, `.5`, `5.`
/// - opérateurs + - * / (toujours binaires ici ; l’unaire est décidé par rpn.rs)
/// - parenthèses ( )
/// - espaces ignorés
pub fn tokenize(s: &str) -> Result<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Op(Op::Add)),
            '-' => Some(Tok::Op(Op::Sub)),
            '*' => Some(Tok::Op(Op::Mul)),
            '/' => Some(Tok::Op(Op::Div)),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(tok);
            i += 1;
            continue;
        }

        // Nombre : course gloutonne de chiffres et de points, validée d’un bloc.
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let lit: String = chars[start..i].iter().collect();
            if decomposer_litteral(&lit).is_none() {
                return Err(CalcError::MalformedNumber(lit));
            }
            out.push(Tok::Num(lit));
            continue;
        }

        return Err(CalcError::InvalidCharacter(c));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(lit) => lit.as_str(),
            Tok::Op(op) => op.symbole(),
            Tok::LPar => "(",
            Tok::RPar => ")",
        })
        .collect::<Vec<_>>()
        .join(" ")
}
