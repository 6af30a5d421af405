// src/app.rs
//
// Calculatrice : module App (racine)
// ---------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs + magasin.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier physique : traduit en Touche, seulement si aucun champ texte (panneau variables)
// n’a le focus, sinon on taperait dans l’expression en saisissant un nom de variable.

pub mod etat;
pub mod magasin;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use crate::noyau::saisie::Operateur;
use crate::noyau::session::Touche;

/// Caractère tapé -> touche du pavé.
fn touche_depuis_char(c: char) -> Option<Touche> {
    if c.is_ascii_digit() {
        return Some(Touche::Chiffre(c));
    }
    if let Some(op) = Operateur::depuis_char(c) {
        return Some(Touche::Operateur(op));
    }
    match c {
        '.' => Some(Touche::Point),
        '(' => Some(Touche::ParOuvrante),
        ')' => Some(Touche::ParFermante),
        '=' => Some(Touche::Egal),
        _ => None,
    }
}

fn touches_clavier(ctx: &egui::Context) -> Vec<Touche> {
    ctx.input(|i| {
        let mut out = Vec::new();
        for ev in &i.events {
            match ev {
                egui::Event::Text(t) => out.extend(t.chars().filter_map(touche_depuis_char)),
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::Enter => out.push(Touche::Egal),
                    egui::Key::Backspace => out.push(Touche::Retour),
                    egui::Key::Escape => out.push(Touche::Effacer),
                    _ => {}
                },
                _ => {}
            }
        }
        out
    })
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !ctx.wants_keyboard_input() {
            for t in touches_clavier(ctx) {
                self.touche(t);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
