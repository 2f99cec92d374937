// src/bin/calc.rs
//
// Calculatrice décimale — ligne de commande
// -----------------------------------------
// - `calc 2 + 3 * 4`  : évalue une fois (mots joints par des espaces)
// - `calc`            : boucle interactive (exit / quit / q ou EOF pour sortir)
// - code de sortie 1 si l’évaluation échoue (mode une-fois)

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, LevelFilter};

use calculatrice_decimale::noyau::{evaluate_detaille, Contexte, PRECISION_DEFAUT};

#[derive(Debug, Parser)]
#[command(
    name = "calc",
    version,
    about = "Évalue des expressions arithmétiques en décimal exact",
    long_about = "Évalue des expressions contenant +, -, *, /, des parenthèses,\n\
        des signes unaires et des nombres décimaux.\n\n\
        EXEMPLES:\n\
        \n  calc '2 + 3 * 4'          Évalue une expression\n\
        \n  calc -- -5 + 3            Expression commençant par un signe\n\
        \n  calc --rpn '(1 + 2) * 3'  Affiche aussi la forme postfixée\n\
        \n  calc                      Boucle interactive"
)]
struct Cli {
    /// Expression à évaluer (boucle interactive si absente)
    #[arg(value_name = "EXPRESSION", trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,

    /// Chiffres significatifs de travail (1 à 200)
    #[arg(long, env = "CALC_PRECISION", default_value_t = PRECISION_DEFAUT)]
    precision: u32,

    /// Affiche la forme postfixée (RPN) avant le résultat
    #[arg(long)]
    rpn: bool,

    /// Augmente la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logs(verbose: u8) {
    let niveau = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(niveau)
        .parse_default_env()
        .init();
}

/// Évalue une ligne et écrit le résultat (ou l’erreur). Retourne `true` si succès.
fn evaluer_et_afficher(
    expression: &str,
    ctx: &Contexte,
    montrer_rpn: bool,
    sortie: &mut impl Write,
) -> io::Result<bool> {
    match evaluate_detaille(expression, ctx) {
        Ok(d) => {
            if montrer_rpn {
                writeln!(sortie, "RPN : {}", d.rpn)?;
            }
            writeln!(sortie, "{}", d.resultat)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(sortie, "Erreur : {e}")?;
            Ok(false)
        }
    }
}

fn est_commande_sortie(ligne: &str) -> bool {
    matches!(ligne.to_lowercase().as_str(), "exit" | "quit" | "q")
}

fn boucle_interactive(
    entree: impl BufRead,
    sortie: &mut impl Write,
    ctx: &Contexte,
    montrer_rpn: bool,
) -> io::Result<()> {
    writeln!(
        sortie,
        "Calculatrice décimale. Entrez une expression ou « exit » pour quitter."
    )?;

    let mut lignes = entree.lines();
    loop {
        write!(sortie, "> ")?;
        sortie.flush()?;

        let Some(ligne) = lignes.next() else {
            // EOF
            writeln!(sortie)?;
            return Ok(());
        };
        let ligne = ligne?;
        let ligne = ligne.trim();

        if ligne.is_empty() {
            continue;
        }
        if est_commande_sortie(ligne) {
            return Ok(());
        }

        evaluer_et_afficher(ligne, ctx, montrer_rpn, sortie)?;
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logs(cli.verbose);

    let ctx = Contexte::avec_precision(cli.precision);
    debug!("précision de travail : {}", ctx.precision());

    let stdout = io::stdout();
    let mut sortie = stdout.lock();

    let resultat = if cli.expression.is_empty() {
        boucle_interactive(io::stdin().lock(), &mut sortie, &ctx, cli.rpn).map(|()| true)
    } else {
        let expression = cli.expression.join(" ");
        evaluer_et_afficher(&expression, &ctx, cli.rpn, &mut sortie)
    };

    match resultat {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Erreur d’entrée/sortie : {e}");
            ExitCode::FAILURE
        }
    }
}
