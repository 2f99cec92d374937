//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, précision, démarche)
//! et offrir des opérations simples (C/CLR/AC/DEL) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing) : on ne fait que déposer ce que le noyau rend.
//! - Actions déterministes, sans effet de bord caché.
//! - Précision bornée par le même garde-fou que le noyau (`Contexte::avec_precision`).

use calculatrice_decimale::noyau::{CalcError, Contexte, Demarche as DemarcheNoyau};

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,
    pub erreur: String,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub contexte: Contexte,

    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            contexte: Contexte::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + précision par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.contexte = Contexte::default();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// DEL : retire le dernier symbole (et les espaces qui l’entourent).
    pub fn backspace_entree(&mut self) {
        let garde = self.entree.trim_end().len();
        self.entree.truncate(garde);
        self.entree.pop();
        let garde = self.entree.trim_end().len();
        self.entree.truncate(garde);
        self.focus_entree = true;
    }

    /// Dépose le verdict du noyau.
    ///
    /// Choix UX : sur erreur, on CONSERVE le dernier résultat affiché,
    /// mais la démarche (devenue non fiable) est effacée.
    pub fn appliquer(&mut self, verdict: Result<DemarcheNoyau, CalcError>) {
        match verdict {
            Ok(d) => {
                self.erreur.clear();
                self.resultat = d.resultat.to_string();
                self.demarche = Demarche {
                    jetons: d.jetons,
                    rpn: d.rpn,
                };
            }
            Err(e) => {
                self.erreur = e.to_string();
                self.demarche = Demarche::default();
            }
        }
        self.focus_entree = true;
    }

    pub fn set_precision(&mut self, precision: u32) {
        self.contexte = Contexte::avec_precision(precision);
        self.focus_entree = true;
    }
}
