// src/noyau/erreurs.rs
//
// Taxonomie d’erreurs du noyau (deux étages) :
// - ErreurSaisie     : refus au moment de l’insertion (toujours affiché tel quel)
// - ErreurEvaluation : échec de l’évaluateur (message générique côté UI, détail au journal)
// - ErreurVariable   : refus du panneau variables (nom / valeur)

use thiserror::Error;

/// Refus du pavé : l’expression reste inchangée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErreurSaisie {
    #[error("Un opérateur ne peut pas commencer l’expression")]
    OperateurEnTete,

    #[error("Placement d’opérateur invalide")]
    OperateurDouble,

    #[error("Plusieurs points décimaux dans un nombre")]
    PointDouble,

    #[error("Point décimal mal placé")]
    PointMalPlace,

    #[error("Parenthèse ouvrante mal placée")]
    ParentheseOuvranteMalPlacee,

    #[error("Parenthèse fermante sans ouvrante")]
    ParentheseFermanteOrpheline,

    #[error("Parenthèse fermante mal placée")]
    ParentheseFermanteMalPlacee,
}

/// Échec d’évaluation. Le texte `Display` est un diagnostic, pas un message utilisateur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurEvaluation {
    #[error("expression vide")]
    ExpressionVide,

    #[error("caractère invalide: {0:?}")]
    CaractereInvalide(String),

    #[error("séquence d’opérateurs mal formée")]
    SequenceOperateurs,

    #[error("parenthèses déséquilibrées")]
    ParenthesesDesequilibrees,

    #[error("nombre mal formé: {0:?}")]
    NombreMalForme(String),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("résultat non fini")]
    ResultatNonFini,
}

/// Message unique montré à l’utilisateur pour toute erreur d’évaluation (mode final).
pub const MESSAGE_EVALUATION: &str = "Expression invalide";

impl ErreurEvaluation {
    /// Message affichable : toujours le même, quel que soit le variant.
    pub fn message_utilisateur(&self) -> &'static str {
        MESSAGE_EVALUATION
    }
}

/// Refus du panneau variables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurVariable {
    #[error("Nom invalide : lettres, chiffres, _ (pas de chiffre en tête)")]
    NomInvalide,

    #[error("Entrez une valeur")]
    ValeurVide,

    #[error("La valeur doit être un nombre")]
    ValeurNonNumerique,
}
