//! Noyau de calcul (f64, sans évaluateur dynamique)
//!
//! Organisation interne :
//! - erreurs.rs   : ErreurSaisie / ErreurEvaluation / ErreurVariable
//! - variables.rs : table nom -> valeur + règles de nom/valeur
//! - saisie.rs    : accumulateur (insertion touche par touche, refus typés)
//! - jetons.rs    : tokenisation + substitution des variables (mots entiers)
//! - controle.rs  : validation structurelle
//! - calcul.rs    : groupes internes d’abord, puis * / puis + -
//! - format.rs    : affichage à 3 décimales (arrondi exact)
//! - eval.rs      : pipeline complet + modes aperçu / final
//! - session.rs   : état explicite (expression, "=" consécutifs, continuation)

pub mod calcul;
pub mod controle;
pub mod erreurs;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod saisie;
pub mod session;
pub mod variables;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;
