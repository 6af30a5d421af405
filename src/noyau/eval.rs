//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> substitution (mots entiers) -> contrôle structurel -> calcul (groupes, * /, + -)
//!
//! Fonction pure : même (expression, table) => même issue. La table est un instantané
//! en lecture seule ; rien n’est retenu d’un appel à l’autre.

use super::calcul::calculer;
use super::controle::controler;
use super::erreurs::ErreurEvaluation;
use super::format::formater_resultat;
use super::jetons::{format_tokens, substituer, tokenize};
use super::variables::TableVariables;

/// Aperçu (à chaque frappe) ou final (touche "=").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Apercu,
    Final,
}

/// API publique : évalue une expression en valeur finie.
pub fn eval_expression(expr: &str, vars: &TableVariables) -> Result<f64, ErreurEvaluation> {
    if expr.trim().is_empty() {
        return Err(ErreurEvaluation::ExpressionVide);
    }

    // 1) Jetons + substitution
    let jetons = substituer(tokenize(expr), vars)?;

    // 2) Contrôle structurel
    controler(&jetons)?;

    // 3) Calcul
    let v = calculer(&jetons)?;
    log::debug!("évalué: {} = {v}", format_tokens(&jetons));
    Ok(v)
}

/// Évalue et met en forme pour l’affichage secondaire.
///
/// - Final  : l’erreur remonte (le détail est pour le journal, pas pour l’écran).
/// - Aperçu : toute erreur donne une sortie vide ; jamais d’erreur.
pub fn evaluer_en_mode(
    expr: &str,
    vars: &TableVariables,
    mode: Mode,
) -> Result<String, ErreurEvaluation> {
    let issue = eval_expression(expr, vars)
        .and_then(|v| formater_resultat(v).ok_or(ErreurEvaluation::ResultatNonFini));

    match mode {
        Mode::Final => issue,
        Mode::Apercu => Ok(issue.unwrap_or_default()),
    }
}

/// Raccourci du mode aperçu.
pub fn apercu(expr: &str, vars: &TableVariables) -> String {
    evaluer_en_mode(expr, vars, Mode::Apercu).unwrap_or_default()
}
