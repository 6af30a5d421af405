// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran : expression (ou "0") + sortie (aperçu pâle / résultat foncé) + ligne d’erreur
// - Puces de variables (insèrent le nom), panneau "Variables" (ajout / modifier / supprimer)
// - Pavé tactile : gros boutons ; la fenêtre d’erreur de saisie se ferme par "OK"
//
// Note :
// - Le clavier physique est géré dans app.rs (seulement si aucun champ texte n’a le focus)

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::saisie::Operateur;
use crate::noyau::session::Touche;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Calculatrice");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Variables").clicked() {
                            self.recharger_variables();
                            self.panneau_ouvert = true;
                        }
                    });
                });
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);
                self.ui_puces(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_pave(ui);
            });

        self.ui_fenetre_panneau(ui.ctx());
        self.ui_fenetre_erreur(ui.ctx());
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(
                        egui::RichText::new(self.session.affichage())
                            .monospace()
                            .size(26.0),
                    );

                    // aperçu pâle, résultat final foncé
                    let couleur = if self.session.sortie_finale() {
                        ui.visuals().strong_text_color()
                    } else {
                        ui.visuals().weak_text_color()
                    };
                    ui.label(
                        egui::RichText::new(self.session.sortie())
                            .monospace()
                            .size(18.0)
                            .color(couleur),
                    );
                });
            });

        if !self.erreur.is_empty() {
            ui.add_space(4.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_puces(&mut self, ui: &mut egui::Ui) {
        if self.variables.is_empty() {
            ui.weak("Aucune variable, bouton « Variables » pour en créer");
            return;
        }

        let mut choisie: Option<String> = None;
        ui.horizontal_wrapped(|ui| {
            for (nom, valeur) in &self.variables {
                let resp = ui
                    .button(format!("{nom}\n{valeur}"))
                    .on_hover_text(format!("Insérer {nom}"));
                if resp.clicked() {
                    choisie = Some(nom.clone());
                }
            }
        });

        if let Some(nom) = choisie {
            self.touche(Touche::Variable(nom));
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calc")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton(ui, "C", Touche::Effacer);
                self.bouton(ui, "DEL", Touche::Retour);
                self.bouton(ui, "(", Touche::ParOuvrante);
                self.bouton(ui, ")", Touche::ParFermante);
                ui.end_row();

                self.bouton_chiffre(ui, '7');
                self.bouton_chiffre(ui, '8');
                self.bouton_chiffre(ui, '9');
                self.bouton(ui, "/", Touche::Operateur(Operateur::Divise));
                ui.end_row();

                self.bouton_chiffre(ui, '4');
                self.bouton_chiffre(ui, '5');
                self.bouton_chiffre(ui, '6');
                self.bouton(ui, "*", Touche::Operateur(Operateur::Fois));
                ui.end_row();

                self.bouton_chiffre(ui, '1');
                self.bouton_chiffre(ui, '2');
                self.bouton_chiffre(ui, '3');
                self.bouton(ui, "-", Touche::Operateur(Operateur::Moins));
                ui.end_row();

                self.bouton_chiffre(ui, '0');
                self.bouton(ui, ".", Touche::Point);
                self.bouton(ui, "=", Touche::Egal);
                self.bouton(ui, "+", Touche::Operateur(Operateur::Plus));
                ui.end_row();
            });
    }

    fn bouton_chiffre(&mut self, ui: &mut egui::Ui, c: char) {
        self.bouton(ui, &c.to_string(), Touche::Chiffre(c));
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, touche: Touche) {
        let resp = ui.add_sized([64.0, 44.0], egui::Button::new(label));
        if resp.clicked() {
            self.touche(touche);
        }
    }

    /* ------------------------ Fenêtres ------------------------ */

    fn ui_fenetre_panneau(&mut self, ctx: &egui::Context) {
        let mut ouvert = self.panneau_ouvert;
        egui::Window::new("Variables")
            .open(&mut ouvert)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| self.ui_panneau(ui));
        self.panneau_ouvert = ouvert && self.panneau_ouvert;
    }

    fn ui_panneau(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.champ_nom)
                    .hint_text("nom")
                    .desired_width(110.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.champ_valeur)
                    .hint_text("valeur")
                    .desired_width(110.0),
            );
            if ui.button("Ajouter").clicked() {
                // l’erreur reste affichée dans le panneau (erreur_panneau)
                let _ = self.ajouter_variable();
            }
        });

        if !self.erreur_panneau.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur_panneau);
        }

        ui.add_space(6.0);
        ui.label(format!("Variables enregistrées : {}", self.variables.len()));
        ui.separator();

        if self.variables.is_empty() {
            ui.weak("Aucune variable enregistrée");
            ui.add_space(6.0);
            if ui.button("Fermer").clicked() {
                self.panneau_ouvert = false;
            }
            return;
        }

        let mut a_editer: Option<String> = None;
        let mut a_supprimer: Option<String> = None;

        egui::Grid::new("liste_variables")
            .num_columns(3)
            .spacing([10.0, 4.0])
            .show(ui, |ui| {
                for (nom, valeur) in &self.variables {
                    ui.monospace(format!("{nom} = {valeur}"));
                    if ui.small_button("Modifier").clicked() {
                        a_editer = Some(nom.clone());
                    }
                    if ui.small_button("Supprimer").clicked() {
                        a_supprimer = Some(nom.clone());
                    }
                    ui.end_row();
                }
            });

        if let Some(nom) = a_editer {
            self.editer_variable(&nom);
        }
        if let Some(nom) = a_supprimer {
            self.supprimer_variable(&nom);
        }

        ui.add_space(6.0);
        if ui.button("Fermer").clicked() {
            self.panneau_ouvert = false;
        }
    }

    fn ui_fenetre_erreur(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.modal.clone() else {
            return;
        };

        egui::Window::new("Erreur")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(msg);
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    self.fermer_modal();
                }
            });
    }
}
