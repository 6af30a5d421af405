//! Tests de propriétés (campagne) : comportement observable du noyau de bout en bout.
//!
//! - priorités et parenthèses
//! - substitution (mot entier, nom le plus long)
//! - erreurs classées, indépendantes de la discipline du pavé
//! - continuation, "=" consécutifs, affichage à 3 décimales

use super::erreurs::{ErreurEvaluation, ErreurSaisie};
use super::eval::{eval_expression, evaluer_en_mode, Mode};
use super::saisie::{inserer, Operateur, Saisie};
use super::session::{Session, Touche};
use super::variables::TableVariables;

fn vars(paires: &[(&str, f64)]) -> TableVariables {
    paires.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn final_ok(expr: &str, t: &TableVariables) -> String {
    evaluer_en_mode(expr, t, Mode::Final).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

/* ------------------------ Arithmétique ------------------------ */

#[test]
fn prop_priorite_multiplication() {
    assert_eq!(eval_expression("2 + 3 * 4", &TableVariables::new()), Ok(14.0));
}

#[test]
fn prop_parentheses_d_abord() {
    assert_eq!(eval_expression("(2 + 3) * 4", &TableVariables::new()), Ok(20.0));
}

#[test]
fn prop_gauche_a_droite() {
    let t = TableVariables::new();
    assert_eq!(eval_expression("20 / 5 * 2", &t), Ok(8.0));
    assert_eq!(eval_expression("20 - 5 + 2", &t), Ok(17.0));
    assert_eq!(eval_expression("2 * (3 + (4 - 1) * 2) / 3", &t), Ok(6.0));
}

/* ------------------------ Variables ------------------------ */

#[test]
fn prop_variable_simple() {
    assert_eq!(eval_expression("x + 2", &vars(&[("x", 5.0)])), Ok(7.0));
}

#[test]
fn prop_nom_long_prioritaire() {
    let t = vars(&[("x", 5.0), ("y", 1.0), ("xy", 100.0)]);
    assert_eq!(eval_expression("xy + 2", &t), Ok(102.0));
}

#[test]
fn prop_pas_de_remplacement_partiel() {
    // "ab" défini, "abc" non : "abc" ne doit pas devenir "<ab>c"
    let t = vars(&[("ab", 1.0)]);
    assert_eq!(
        eval_expression("abc + 1", &t),
        Err(ErreurEvaluation::CaractereInvalide("abc".into()))
    );
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn prop_division_par_zero() {
    assert_eq!(
        eval_expression("5 / 0", &TableVariables::new()),
        Err(ErreurEvaluation::DivisionParZero)
    );
}

#[test]
fn prop_operateurs_doubles_deux_etages() {
    // l’évaluateur refuse l’expression construite à la main...
    assert_eq!(
        eval_expression("2 + + 3", &TableVariables::new()),
        Err(ErreurEvaluation::SequenceOperateurs)
    );
    // ...et le pavé ne permet même pas de la construire
    assert_eq!(
        inserer("2 + ", &Saisie::Operateur(Operateur::Plus)),
        Err(ErreurSaisie::OperateurDouble)
    );
}

#[test]
fn prop_apercu_jamais_en_erreur() {
    let t = TableVariables::new();
    for e in ["", "  ", "5 / 0", "2 +", "(1", "1..2", "z", "2 $ 2"] {
        assert_eq!(evaluer_en_mode(e, &t, Mode::Apercu), Ok(String::new()), "expr={e:?}");
    }
}

/* ------------------------ Affichage / continuation ------------------------ */

#[test]
fn prop_un_tiers() {
    assert_eq!(final_ok("1 / 3", &TableVariables::new()), "0.333");
}

#[test]
fn prop_aller_retour_du_resultat() {
    let t = vars(&[("k", 7.0)]);
    for e in ["1 / 3", "2 - 7", "k / 8", "0.1 + 0.2", "-1 / 3", "1000000 * 1000000"] {
        let r = final_ok(e, &t);
        assert_eq!(final_ok(&r, &t), r, "aller-retour de {e:?}");
    }
}

#[test]
fn prop_double_egal_idempotent() {
    let t = TableVariables::new();
    let mut s = Session::new();
    for tch in [
        Touche::Chiffre('6'),
        Touche::Operateur(Operateur::Fois),
        Touche::Chiffre('7'),
        Touche::Egal,
    ] {
        s.appuyer(tch, &t).unwrap();
    }
    assert_eq!(s.expression(), "42");

    s.appuyer(Touche::Egal, &t).unwrap();
    assert_eq!(s.expression(), "");
    assert_eq!(s.sortie(), "");

    // un 3e "=" sur vide : échec normal (compteur reparti de zéro), jamais fatal
    assert!(s.appuyer(Touche::Egal, &t).is_err());
}
