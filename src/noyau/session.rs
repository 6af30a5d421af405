// src/noyau/session.rs
//
// Session de calcul : tout l’état mutable, explicite, passé par &mut.
// - expression accumulée
// - compteur de "=" consécutifs (le 2e "=" efface)
// - continuation (après un résultat : un opérateur repart du résultat, le reste repart de zéro)
// - sortie secondaire (aperçu ou résultat final)
//
// Les erreurs sont rendues à l’appelant sous forme d’Alerte :
// message court pour l’écran, diagnostic complet pour le journal.

use super::erreurs::{ErreurEvaluation, ErreurSaisie};
use super::eval::{apercu, evaluer_en_mode, Mode};
use super::saisie::{inserer, Operateur, Saisie};
use super::variables::TableVariables;

/// Événements du pavé.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre(char),
    Point,
    Operateur(Operateur),
    ParOuvrante,
    ParFermante,
    Effacer,
    Retour,
    Egal,
    Variable(String),
}

impl Touche {
    fn saisie(&self) -> Option<Saisie> {
        match self {
            Touche::Chiffre(c) => Some(Saisie::Chiffre(*c)),
            Touche::Point => Some(Saisie::Point),
            Touche::Operateur(op) => Some(Saisie::Operateur(*op)),
            Touche::ParOuvrante => Some(Saisie::ParOuvrante),
            Touche::ParFermante => Some(Saisie::ParFermante),
            Touche::Variable(nom) => Some(Saisie::Nom(nom.clone())),
            Touche::Effacer | Touche::Retour | Touche::Egal => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cause {
    Saisie(ErreurSaisie),
    Evaluation(ErreurEvaluation),
}

/// Signal d’erreur pour l’affichage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alerte {
    /// Texte montré à l’utilisateur.
    pub message: String,
    /// Détail complet (journal de diagnostic), jamais affiché tel quel.
    pub diagnostic: String,
    pub cause: Cause,
}

impl From<ErreurSaisie> for Alerte {
    fn from(e: ErreurSaisie) -> Self {
        Self {
            message: e.to_string(),
            diagnostic: format!("saisie refusée: {e:?}"),
            cause: Cause::Saisie(e),
        }
    }
}

impl From<ErreurEvaluation> for Alerte {
    fn from(e: ErreurEvaluation) -> Self {
        Self {
            message: e.message_utilisateur().to_string(),
            diagnostic: format!("évaluation refusée: {e} ({e:?})"),
            cause: Cause::Evaluation(e),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    expression: String,
    sortie: String,
    sortie_finale: bool,

    // expression évaluée, gardée à l’écran tant que la continuation est armée
    derniere_expression: String,

    egal_consecutifs: u32,
    continuation: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texte accumulé (après un "=", c’est le résultat).
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Affichage principal : l’expression, "0" si vide ;
    /// juste après un "=", l’expression qui vient d’être évaluée.
    pub fn affichage(&self) -> &str {
        if self.continuation {
            return &self.derniere_expression;
        }
        if self.expression.is_empty() {
            "0"
        } else {
            &self.expression
        }
    }

    /// Affichage secondaire : aperçu ou résultat final (vide si rien à montrer).
    pub fn sortie(&self) -> &str {
        &self.sortie
    }

    /// true si `sortie()` vient d’un "=" (l’UI l’affiche plus foncé).
    pub fn sortie_finale(&self) -> bool {
        self.sortie_finale
    }

    /// Traite une touche. `vars` : instantané de la table pour cet événement.
    pub fn appuyer(&mut self, touche: Touche, vars: &TableVariables) -> Result<(), Alerte> {
        match touche {
            Touche::Egal => {
                self.egal_consecutifs += 1;
                if self.egal_consecutifs >= 2 {
                    log::debug!("double \"=\" : remise à zéro");
                    self.effacer();
                    return Ok(());
                }
                self.evaluer_final(vars)
            }
            Touche::Effacer => {
                self.effacer();
                Ok(())
            }
            Touche::Retour => {
                self.egal_consecutifs = 0;
                self.continuation = false;
                self.expression.pop();
                self.rafraichir_apercu(vars);
                Ok(())
            }
            autre => {
                let Some(saisie) = autre.saisie() else {
                    return Ok(());
                };
                self.inserer(saisie, vars)
            }
        }
    }

    fn inserer(&mut self, saisie: Saisie, vars: &TableVariables) -> Result<(), Alerte> {
        self.egal_consecutifs = 0;

        // après un résultat : un opérateur repart du résultat (déjà dans `expression`),
        // le reste repart d’une page blanche
        let repart_de_zero = self.continuation && !matches!(saisie, Saisie::Operateur(_));
        let base = if repart_de_zero { "" } else { self.expression.as_str() };

        match inserer(base, &saisie) {
            Ok(nouvelle) => {
                self.continuation = false;
                self.expression = nouvelle;
                self.rafraichir_apercu(vars);
                Ok(())
            }
            Err(e) => {
                // refus : expression, sortie et continuation restent telles quelles
                log::debug!("saisie refusée {saisie:?} sur {base:?}: {e:?}");
                Err(e.into())
            }
        }
    }

    fn evaluer_final(&mut self, vars: &TableVariables) -> Result<(), Alerte> {
        match evaluer_en_mode(&self.expression, vars, Mode::Final) {
            Ok(resultat) => {
                log::debug!("{:?} = {resultat}", self.expression);
                self.derniere_expression = std::mem::replace(&mut self.expression, resultat.clone());
                self.sortie = resultat;
                self.sortie_finale = true;
                self.continuation = true;
                Ok(())
            }
            Err(e) => {
                let alerte = Alerte::from(e);
                log::warn!("{} sur {:?}", alerte.diagnostic, self.expression);
                Err(alerte)
            }
        }
    }

    fn rafraichir_apercu(&mut self, vars: &TableVariables) {
        self.sortie = apercu(&self.expression, vars);
        self.sortie_finale = false;
    }

    /// "C" : tout revient à zéro.
    pub fn effacer(&mut self) {
        *self = Self::default();
    }
}
