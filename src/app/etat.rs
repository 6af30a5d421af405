//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : relier la session du noyau, le magasin de variables et ce que la vue affiche
//! (erreur en ligne, fenêtre d’erreur, panneau variables).
//!
//! Contrats :
//! - Aucune règle de calcul ici : tout passe par `Session::appuyer`.
//! - La table de variables est relue depuis le magasin à chaque touche (instantané).
//! - Erreur de saisie => fenêtre (message précis) ; erreur d’évaluation => ligne d’erreur
//!   (message générique, le détail part au journal).

use crate::noyau::erreurs::ErreurVariable;
use crate::noyau::session::{Cause, Session, Touche};
use crate::noyau::variables::{definir, TableVariables};

use super::magasin::{magasin_par_defaut, MagasinVariables};

pub struct AppCalc {
    // --- calcul ---
    pub session: Session,

    // --- sorties ---
    pub erreur: String,         // ligne d’erreur (évaluation finale)
    pub modal: Option<String>,  // fenêtre d’erreur (saisie refusée)

    // --- variables ---
    magasin: Box<dyn MagasinVariables>,
    pub variables: TableVariables, // copie pour l’affichage (puces + panneau)

    // --- panneau variables ---
    pub panneau_ouvert: bool,
    pub champ_nom: String,
    pub champ_valeur: String,
    pub erreur_panneau: String,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_magasin(magasin_par_defaut())
    }
}

impl AppCalc {
    pub fn avec_magasin(magasin: Box<dyn MagasinVariables>) -> Self {
        let variables = magasin.charger();
        Self {
            session: Session::new(),
            erreur: String::new(),
            modal: None,
            magasin,
            variables,
            panneau_ouvert: false,
            champ_nom: String::new(),
            champ_valeur: String::new(),
            erreur_panneau: String::new(),
        }
    }

    /* ------------------------ Pavé ------------------------ */

    /// Une touche du pavé (ou du clavier).
    pub fn touche(&mut self, t: Touche) {
        let effacer = matches!(t, Touche::Effacer);
        let vars = self.magasin.charger();

        match self.session.appuyer(t, &vars) {
            Ok(()) => self.erreur.clear(),
            Err(alerte) => match alerte.cause {
                Cause::Saisie(_) => self.modal = Some(alerte.message),
                Cause::Evaluation(_) => self.erreur = alerte.message,
            },
        }

        if effacer {
            self.modal = None;
        }
        self.variables = vars;
    }

    pub fn fermer_modal(&mut self) {
        self.modal = None;
    }

    /* ------------------------ Panneau variables ------------------------ */

    pub fn recharger_variables(&mut self) {
        self.variables = self.magasin.charger();
    }

    /// Ajoute (ou remplace) la variable des champs du panneau, puis sauve.
    pub fn ajouter_variable(&mut self) -> Result<(), ErreurVariable> {
        let mut table = self.magasin.charger();
        match definir(&mut table, &self.champ_nom, &self.champ_valeur) {
            Ok(()) => {
                self.magasin.sauver(&table);
                log::info!("variable {} = {}", self.champ_nom.trim(), self.champ_valeur.trim());
                self.champ_nom.clear();
                self.champ_valeur.clear();
                self.erreur_panneau.clear();
                self.variables = table;
                Ok(())
            }
            Err(e) => {
                self.erreur_panneau = e.to_string();
                Err(e)
            }
        }
    }

    /// Pré-remplit le formulaire (l’ajout écrasera la valeur).
    pub fn editer_variable(&mut self, nom: &str) {
        if let Some(v) = self.variables.get(nom) {
            self.champ_nom = nom.to_string();
            self.champ_valeur = v.to_string();
            self.erreur_panneau.clear();
        }
    }

    pub fn supprimer_variable(&mut self, nom: &str) {
        let mut table = self.magasin.charger();
        if table.remove(nom).is_some() {
            self.magasin.sauver(&table);
            log::info!("variable {nom} supprimée");
        }
        self.variables = table;
    }
}
