// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Clavier : Enter évalue (quand le champ a le focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Toute évaluation passe par le noyau (evaluate_detaille)

use eframe::egui;

use calculatrice_decimale::noyau::{evaluate_detaille, PRECISION_MAX};

use super::etat::AppCalc;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice décimale");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                ui.label("Résultat :");
                Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 3 * (-2 + 5) / 3, 0.1 + 0.2")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter évalue seulement si le champ est focus (pas de déclenchement “global”).
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.evaluer();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            ui.label("Précision :");
            let mut p = self.contexte.precision();
            let resp = ui.add(
                egui::DragValue::new(&mut p)
                    .speed(1)
                    .range(1..=PRECISION_MAX)
                    .suffix(" chiffres"),
            );
            if resp.changed() {
                self.set_precision(p);
            }
        });

        ui.add_space(8.0);

        self.ui_pave(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, format!("Erreur : {}", self.erreur));
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_decimal")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", Insertion::Chiffre);
                self.bouton_insert(ui, "8", Insertion::Chiffre);
                self.bouton_insert(ui, "9", Insertion::Chiffre);
                self.bouton_insert(ui, "/", Insertion::Operateur);
                ui.end_row();

                self.bouton_insert(ui, "4", Insertion::Chiffre);
                self.bouton_insert(ui, "5", Insertion::Chiffre);
                self.bouton_insert(ui, "6", Insertion::Chiffre);
                self.bouton_insert(ui, "*", Insertion::Operateur);
                ui.end_row();

                self.bouton_insert(ui, "1", Insertion::Chiffre);
                self.bouton_insert(ui, "2", Insertion::Chiffre);
                self.bouton_insert(ui, "3", Insertion::Chiffre);
                self.bouton_insert(ui, "-", Insertion::Operateur);
                ui.end_row();

                self.bouton_insert(ui, "0", Insertion::Chiffre);
                self.bouton_insert(ui, ".", Insertion::Chiffre);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                self.bouton_insert(ui, "+", Insertion::Operateur);
                ui.end_row();

                self.bouton_insert(ui, "(", Insertion::Parenthese);
                self.bouton_insert(ui, ")", Insertion::Parenthese);
                ui.label("");
                let eq = ui.add_sized([46.0, 28.0], egui::Button::new("="));
                if eq.clicked() {
                    self.evaluer();
                }
                ui.end_row();
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                ui.label("Jetons :");
                Self::champ_monospace(ui, "demarche_jetons", &self.demarche.jetons, 1);
                ui.add_space(4.0);
                ui.label("RPN :");
                Self::champ_monospace(ui, "demarche_rpn", &self.demarche.rpn, 1);
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([46.0, 28.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, texte: &str, kind: Insertion) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(texte));
        if !resp.clicked() {
            return;
        }

        match kind {
            // chiffres et parenthèses : collés
            Insertion::Chiffre | Insertion::Parenthese => self.entree.push_str(texte),
            Insertion::Operateur => {
                let garde = self.entree.trim_end().len();
                self.entree.truncate(garde);
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(texte);
                self.entree.push(' ');
            }
        }

        self.focus_entree = true;
    }

    /// Évalue via le noyau, puis dépose résultat/erreur/démarche dans l’état UI.
    fn evaluer(&mut self) {
        let verdict = evaluate_detaille(&self.entree, &self.contexte);
        self.appliquer(verdict);
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum Insertion {
    Chiffre,
    Operateur,
    Parenthese,
}
